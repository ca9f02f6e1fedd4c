/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use crate::application::auth::{AppleIdSignIn, Auth, IdentityProvider};
use crate::application::config::Config;
use crate::application::csrf::{CsrfPrimer, ResourceKind};
use crate::application::interfaces::{
    AppGroupService, AppService, CertificateService, DeviceService, TeamService,
    WebsitePushService,
};
use crate::application::pagination::collect_pages;
use crate::application::session::Session;
use crate::application::team_selector::TeamSelector;
use crate::constants::{ALL_CERTIFICATE_TYPE_IDS, DEFAULT_PAGE_SIZE};
use crate::error::AppError;
use crate::model::http::{HttpClient, RequestBody};
use crate::model::requests::{FormParams, Platform};
use crate::model::responses::Team;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Signed-in developer portal client
///
/// Every resource family is exposed through its service trait
/// ([`AppService`], [`DeviceService`], ...), all implemented here.
pub struct Client {
    config: Arc<Config>,
    http: Arc<HttpClient>,
    auth: Auth,
    session: RwLock<Session>,
}

impl Client {
    /// Signs in with Apple ID credentials from `config`
    ///
    /// # Returns
    /// * `Ok(Client)` - Authenticated client
    /// * `Err(AppError::Authentication)` - Login failed
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let provider = Arc::new(AppleIdSignIn::new(&config));
        Self::with_provider(config, provider).await
    }

    /// Signs in through a custom identity provider
    pub async fn with_provider(
        config: Config,
        provider: Arc<dyn IdentityProvider>,
    ) -> Result<Self, AppError> {
        let http = Arc::new(HttpClient::new(&config.portal)?);
        let auth = Auth::new(config.credentials.clone(), provider);
        let session = Session::new(http.jar().clone(), config.team_id.clone());

        let client = Self {
            config: Arc::new(config),
            http,
            auth,
            session: RwLock::new(session),
        };
        client.login().await?;
        Ok(client)
    }

    /// Signs in again with the configured credentials
    pub async fn login(&self) -> Result<(), AppError> {
        self.auth.login(&self.http).await?;
        self.session.write().await.mark_logged_in();
        Ok(())
    }

    /// Configuration the client was built with
    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// HTTP layer of the session
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Session cookies as a `Cookie` header value
    pub fn cookie_header(&self) -> Option<String> {
        self.http.cookie_header()
    }

    /// When the session last signed in
    pub async fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        self.session.read().await.logged_in_at()
    }

    /// Teams the account belongs to, sorted by name then identifier
    ///
    /// Fetched once and memoized until [`Client::invalidate_teams`].
    pub async fn teams(&self) -> Result<Vec<Team>, AppError> {
        if let Some(teams) = self.session.read().await.teams() {
            return Ok(teams.to_vec());
        }

        debug!("Fetching team list");
        let value = self
            .http
            .request(
                Method::POST,
                "account/listTeams.action",
                RequestBody::Empty,
                None,
            )
            .await?;
        // A body without a team list means no reachable team.
        let teams: Vec<Team> = match value.get("teams") {
            None | Some(Value::Null) => Vec::new(),
            Some(teams) => serde_json::from_value(teams.clone())?,
        };

        let mut session = self.session.write().await;
        Ok(session.set_teams(teams).to_vec())
    }

    /// Team every request is scoped to
    ///
    /// An explicit selection wins, then the configured team; otherwise the
    /// first team in sorted order is picked.
    pub async fn team_id(&self) -> Result<String, AppError> {
        if let Some(team_id) = self.session.read().await.current_team_id() {
            return Ok(team_id.to_string());
        }
        self.teams().await?;
        self.session
            .write()
            .await
            .resolve_team_id(self.auth.username())
    }

    /// Operates on another team from now on
    ///
    /// Cached anti-forgery tokens belong to the previous team and are dropped.
    pub async fn set_team_id(&self, team_id: &str) {
        info!("Switching to team {}", team_id);
        self.session.write().await.set_team_id(team_id);
        self.http.clear_csrf().await;
    }

    /// Lets `selector` pick the team, typically by asking the user
    pub async fn select_team(&self, selector: &dyn TeamSelector) -> Result<String, AppError> {
        let teams = self.teams().await?;
        let team_id = selector.select_team(&teams)?;
        self.set_team_id(&team_id).await;
        Ok(team_id)
    }

    /// Record of the current team, if the account still lists it
    pub async fn team_information(&self) -> Result<Option<Team>, AppError> {
        let team_id = self.team_id().await?;
        Ok(self
            .teams()
            .await?
            .into_iter()
            .find(|team| team.team_id == team_id))
    }

    /// Whether the current team is an enterprise in-house team
    pub async fn in_house(&self) -> Result<bool, AppError> {
        if let Some(in_house) = self.session.read().await.in_house() {
            return Ok(in_house);
        }
        let in_house = self
            .team_information()
            .await?
            .is_some_and(|team| team.is_in_house());
        self.session.write().await.set_in_house(in_house);
        Ok(in_house)
    }

    /// Drops the memoized team list and in-house flag
    pub async fn invalidate_teams(&self) {
        self.session.write().await.invalidate_teams();
    }

    /// Drops every cached anti-forgery token, and the active one
    pub async fn clear_csrf_cache(&self) {
        self.http.clear_csrf().await;
    }

    /// Makes sure a token accepted for mutating `kind` is active
    pub(crate) async fn ensure_csrf(&self, kind: ResourceKind) -> Result<(), AppError> {
        self.http.ensure_csrf(kind, || self.prime_csrf(kind)).await
    }

    async fn prime_csrf(&self, kind: ResourceKind) -> Result<(), AppError> {
        match kind.primer() {
            CsrfPrimer::SingleProfileProbe => {
                self.fetch_csrf_token_for_provisioning(Platform::Ios).await
            }
            CsrfPrimer::ListAll => {
                match kind {
                    ResourceKind::App => self.apps(Platform::Ios).await?,
                    ResourceKind::AppGroup => self.app_groups().await?,
                    ResourceKind::Certificate => {
                        self.certificates(ALL_CERTIFICATE_TYPE_IDS, Platform::Ios)
                            .await?
                    }
                    ResourceKind::Device => self.devices(Platform::Ios, false).await?,
                    ResourceKind::WebsitePush => self.website_pushes(Platform::Ios).await?,
                    ResourceKind::TeamMember => self.team_members().await?,
                    ResourceKind::ProvisioningProfile => {
                        self.fetch_csrf_token_for_provisioning(Platform::Ios).await?;
                        Vec::new()
                    }
                };
                Ok(())
            }
        }
    }

    /// Reads a single profile from the web listing
    ///
    /// The complete profile listing goes to the IDE host, which never hands
    /// out tokens; this one-record page does.
    async fn fetch_csrf_token_for_provisioning(&self, platform: Platform) -> Result<(), AppError> {
        let path = format!("account/{}/profile/listProvisioningProfiles.action", platform);
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("pageNumber", 1)
            .with("pageSize", 1)
            .with("sort", "name=asc");
        self.http
            .request_page(&path, params, "provisioningProfiles", 1)
            .await?;
        Ok(())
    }

    /// Collects every page of a form-encoded listing
    ///
    /// `params` must not carry paging keys; `pageNumber` and `pageSize`
    /// are appended per page.
    pub(crate) async fn paged(
        &self,
        path: &str,
        params: FormParams,
        key: &str,
    ) -> Result<Vec<Value>, AppError> {
        collect_pages(|page_number| {
            let params = params
                .clone()
                .with("pageNumber", page_number)
                .with("pageSize", DEFAULT_PAGE_SIZE);
            self.http
                .request_page(path, params, key, DEFAULT_PAGE_SIZE)
        })
        .await
    }

    /// Sends a form-encoded POST and extracts `key`
    pub(crate) async fn post_form(
        &self,
        path: &str,
        params: FormParams,
        key: Option<&str>,
    ) -> Result<Value, AppError> {
        self.http
            .request(Method::POST, path, RequestBody::Form(params), key)
            .await
    }

    /// Sends a JSON POST and returns the full body
    pub(crate) async fn post_json<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, AppError> {
        let body = serde_json::to_value(body)?;
        self.http
            .request(Method::POST, path, RequestBody::Json(body), None)
            .await
    }
}
