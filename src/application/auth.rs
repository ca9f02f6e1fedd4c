/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Authentication against the developer portal
//!
//! The credential exchange itself is delegated to an [`IdentityProvider`].
//! This module only enforces the portal's login rule: when the first
//! exchange leaves the jar without the `myacinfo` cookie (accounts with
//! two-step verification only get a partial cookie the first time), the
//! same credentials are sent exactly once more.

use crate::application::config::{Config, Credentials};
use crate::constants::AUTH_MARKER_COOKIE;
use crate::error::AppError;
use crate::model::http::{HttpClient, RequestBody};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Exchanges a username and password for session cookies
///
/// Implementations write cookies into the jar of the given [`HttpClient`],
/// typically by simply sending their requests through it.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sends one login request
    ///
    /// # Returns
    /// * `Ok(())` - The exchange finished; the marker cookie decides whether it was enough
    /// * `Err(AppError)` - The credentials were rejected or the transport failed
    async fn send_login_request(
        &self,
        http: &HttpClient,
        username: &str,
        password: &str,
    ) -> Result<(), AppError>;
}

/// Apple ID sign-in over the web login endpoint
pub struct AppleIdSignIn {
    sign_in_url: String,
    widget_key: Option<String>,
}

impl AppleIdSignIn {
    /// Creates the provider from the portal configuration
    pub fn new(config: &Config) -> Self {
        Self {
            sign_in_url: config.portal.sign_in_url.clone(),
            widget_key: config.portal.widget_key.clone(),
        }
    }
}

#[async_trait]
impl IdentityProvider for AppleIdSignIn {
    async fn send_login_request(
        &self,
        http: &HttpClient,
        username: &str,
        password: &str,
    ) -> Result<(), AppError> {
        let body = serde_json::json!({
            "accountName": username,
            "password": password,
            "rememberMe": true,
        });

        let mut headers = vec![
            ("X-Requested-With", "XMLHttpRequest"),
            ("Accept", "application/json, text/javascript"),
        ];
        if let Some(key) = &self.widget_key {
            headers.push(("X-Apple-Widget-Key", key.as_str()));
        }

        debug!("Sending login request to: {}", self.sign_in_url);
        let response = http
            .send(Method::POST, &self.sign_in_url, headers, &RequestBody::Json(body))
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("Login rejected with status {}", status);
                Err(AppError::Authentication(
                    "invalid username and password combination".to_string(),
                ))
            }
            // 409: a second factor is pending, the partial cookie is set.
            s if s.is_success() || s == StatusCode::CONFLICT => Ok(()),
            s => {
                error!("Login failed with status {}", s);
                Err(AppError::Unexpected(s))
            }
        }
    }
}

/// Login manager for the portal session
pub struct Auth {
    credentials: Credentials,
    provider: Arc<dyn IdentityProvider>,
}

impl Auth {
    /// Creates a login manager around an identity provider
    ///
    /// # Arguments
    /// * `credentials` - Apple ID and password
    /// * `provider` - Credential exchange to use
    pub fn new(credentials: Credentials, provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            credentials,
            provider,
        }
    }

    /// Username the session signs in with
    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Signs in, re-sending the credentials once if needed
    ///
    /// # Returns
    /// * `Ok(())` - The jar holds the authenticated marker cookie
    /// * `Err(AppError::Authentication)` - The credentials were rejected, or
    ///   the marker cookie is still missing after the re-attempt
    pub async fn login(&self, http: &HttpClient) -> Result<(), AppError> {
        let Credentials { username, password } = &self.credentials;
        info!("Logging in as {}", username);

        self.provider
            .send_login_request(http, username, password)
            .await?;
        if http.has_cookie(AUTH_MARKER_COOKIE) {
            info!("✓ Login successful");
            return Ok(());
        }

        warn!("Session cookie missing after first login attempt, sending credentials again");
        self.provider
            .send_login_request(http, username, password)
            .await?;
        if http.has_cookie(AUTH_MARKER_COOKIE) {
            info!("✓ Login successful after second attempt");
            return Ok(());
        }

        error!("Session cookie still missing after second login attempt");
        Err(AppError::Authentication(
            "missing session cookie after login".to_string(),
        ))
    }
}
