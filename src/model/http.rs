/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Request dispatch for the portal
//!
//! [`HttpClient`] owns the cookie jar of the session and the anti-forgery
//! token state. Every request goes out with the session cookies and, when
//! one is installed, the active `csrf`/`csrf_ts` pair. Responses are decoded
//! (JSON, or an XML property list for the IDE host), their envelope is
//! checked, and any fresh token pair they carry becomes the active one.

use crate::application::config::PortalConfig;
use crate::application::csrf::{CsrfCache, CsrfTokens, ResourceKind};
use crate::application::pagination::Page;
use crate::constants::USER_AGENT;
use crate::error::AppError;
use crate::model::requests::FormParams;
use crate::model::responses::{envelope_error, plist_to_json, unwrap_envelope};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method, Response, Url};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

/// How the parameters of a request are encoded
///
/// Fixed per endpoint: resource CRUD endpoints take form parameters, team
/// management endpoints take a JSON body, downloads take a query string.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No parameters
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` body
    Form(FormParams),
    /// Query string
    Query(FormParams),
    /// `application/json` body
    Json(Value),
}

/// HTTP layer shared by the session and the resource façade
pub struct HttpClient {
    client: Client,
    jar: Arc<Jar>,
    base_url: Url,
    csrf: RwLock<CsrfCache>,
}

impl HttpClient {
    /// Creates the HTTP layer with an empty cookie jar
    ///
    /// # Arguments
    /// * `portal` - Endpoints and timeout of the portal
    pub fn new(portal: &PortalConfig) -> Result<Self, AppError> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(jar.clone())
            .timeout(Duration::from_secs(portal.timeout))
            .build()?;

        Ok(Self {
            client,
            jar,
            base_url: parse_base_url(&portal.base_url)?,
            csrf: RwLock::new(CsrfCache::new()),
        })
    }

    /// Cookie jar of the session
    pub fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    /// Versioned base URL relative paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a relative endpoint path, or parses a full URL
    pub fn resolve(&self, path: &str) -> Result<Url, AppError> {
        let url = if path.starts_with("http") {
            Url::parse(path)
        } else {
            self.base_url.join(path.trim_start_matches('/'))
        };
        url.map_err(|e| AppError::InvalidInput(format!("invalid url '{path}': {e}")))
    }

    /// Stores a `Set-Cookie` style string for `url`
    pub fn add_cookie(&self, cookie: &str, url: &Url) {
        self.jar.add_cookie_str(cookie, url);
    }

    /// Cookies the portal would receive, as a `Cookie` header value
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// Whether the jar holds a cookie called `name` for the portal
    #[must_use]
    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookie_header().is_some_and(|header| {
            header
                .split(';')
                .filter_map(|pair| pair.trim().split_once('='))
                .any(|(key, _)| key == name)
        })
    }

    /// Token currently attached to outgoing requests
    pub async fn active_csrf(&self) -> Option<CsrfTokens> {
        self.csrf.read().await.active().cloned()
    }

    /// Replaces the token attached to outgoing requests
    pub async fn set_active_csrf(&self, tokens: Option<CsrfTokens>) {
        self.csrf.write().await.set_active(tokens);
    }

    /// Cached token for one resource family
    pub async fn cached_csrf(&self, kind: ResourceKind) -> Option<CsrfTokens> {
        self.csrf.read().await.cached(kind).cloned()
    }

    /// Drops every cached token and the active one
    pub async fn clear_csrf(&self) {
        self.csrf.write().await.clear();
    }

    /// Drops the cached token of one resource family
    pub async fn invalidate_csrf(&self, kind: ResourceKind) {
        self.csrf.write().await.invalidate(kind);
    }

    /// Makes sure a token for `kind` is active
    ///
    /// On a cache hit the cached token is installed and no request is made.
    /// On a miss the active token is cleared, `primer` runs twice in a row
    /// and whatever token is active afterwards is cached for `kind`.
    /// A failing probe propagates and nothing is cached.
    pub async fn ensure_csrf<F, Fut>(&self, kind: ResourceKind, mut primer: F) -> Result<(), AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        {
            let mut csrf = self.csrf.write().await;
            if csrf.install(kind) {
                debug!("Using cached CSRF token for {}", kind);
                return Ok(());
            }
            csrf.set_active(None);
        }

        debug!("Priming CSRF token for {}", kind);
        // The token issued with the first read is rejected by the portal;
        // only the second read yields one that mutating calls accept.
        primer().await?;
        primer().await?;

        let mut csrf = self.csrf.write().await;
        if csrf.capture(kind) {
            debug!("CSRF token cached for {}", kind);
        } else {
            warn!("No CSRF token received while priming {}", kind);
        }
        Ok(())
    }

    /// Sends one request without any portal specific headers
    ///
    /// Used by the identity provider; cookies still flow through the jar.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &RequestBody,
    ) -> Result<Response, AppError> {
        let url = self.resolve(url)?;
        make_http_request(&self.client, method, url, headers, body).await
    }

    /// Sends one portal request with the active token attached
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: &RequestBody,
    ) -> Result<Response, AppError> {
        let url = self.resolve(path)?;
        let tokens = self.active_csrf().await;

        let mut headers = vec![("accept", "application/json, text/plain, */*")];
        if let Some(tokens) = &tokens {
            headers.extend(tokens.headers());
        }

        make_http_request(&self.client, method, url, headers, body).await
    }

    /// Sends a request and unwraps its envelope
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Path relative to the base URL, or a full URL
    /// * `body` - Parameters, encoded as the endpoint requires
    /// * `key` - Sub-key to extract from a successful envelope; the full
    ///   body is returned when the key is absent
    ///
    /// # Returns
    /// * `Ok(Value)` - Extracted value
    /// * `Err(AppError::Request)` - Non-success envelope, with the server message
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        key: Option<&str>,
    ) -> Result<Value, AppError> {
        let response = self.dispatch(method, path, &body).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;
        let decoded = decode_body(&headers, &text);

        if !status.is_success() {
            let message = decoded.ok().as_ref().and_then(envelope_error);
            error!("Request to {} failed with status {}", path, status);
            return Err(match message {
                Some(message) => AppError::Request(message),
                None => AppError::Unexpected(status),
            });
        }

        let value = unwrap_envelope(decoded?, key).inspect_err(|e| {
            error!("Request to {} returned a failed envelope: {}", path, e);
        })?;
        self.store_csrf(&headers).await;
        Ok(value)
    }

    /// Fetches one page of a form-encoded listing
    pub async fn request_page(
        &self,
        path: &str,
        params: FormParams,
        key: &str,
        page_size: u32,
    ) -> Result<Page<Value>, AppError> {
        let body = self
            .request(Method::POST, path, RequestBody::Form(params), None)
            .await?;
        Page::from_envelope(body, key, page_size)
    }

    /// Downloads raw content, validated by a marker substring
    ///
    /// The portal answers these endpoints with a success status even when
    /// it sends an error page instead of the payload, so success is decided
    /// by `marker` being present in the body.
    pub async fn download(
        &self,
        path: &str,
        params: FormParams,
        marker: &str,
    ) -> Result<Vec<u8>, AppError> {
        let response = self
            .dispatch(Method::GET, path, &RequestBody::Query(params))
            .await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        if status.is_success() && contains_marker(&bytes, marker) {
            self.store_csrf(&headers).await;
            return Ok(bytes.to_vec());
        }
        error!("Download from {} returned unexpected content ({})", path, status);
        Err(AppError::UnexpectedResponse(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    }

    async fn store_csrf(&self, headers: &HeaderMap) {
        if let Some(tokens) = CsrfTokens::from_headers(headers) {
            self.csrf.write().await.set_active(Some(tokens));
        }
    }
}

/// Whether `marker` occurs anywhere in a raw, possibly binary, body
fn contains_marker(body: &[u8], marker: &str) -> bool {
    let marker = marker.as_bytes();
    marker.is_empty() || body.windows(marker.len()).any(|window| window == marker)
}

fn parse_base_url(base_url: &str) -> Result<Url, AppError> {
    let mut base_url = base_url.to_string();
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    Url::parse(&base_url)
        .map_err(|e| AppError::InvalidInput(format!("invalid base url '{base_url}': {e}")))
}

/// Decodes a response body into the JSON value model
///
/// XML property lists are detected by content type or by the XML prolog;
/// an empty body decodes to `null`.
pub fn decode_body(headers: &HeaderMap, text: &str) -> Result<Value, AppError> {
    let is_xml = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("xml"))
        || text.trim_start().starts_with("<?xml");

    if is_xml {
        let plist = plist::Value::from_reader_xml(text.as_bytes())?;
        return Ok(plist_to_json(plist));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

/// Builds and sends one request
///
/// No retry happens here: a transport failure is returned as is.
///
/// # Arguments
///
/// * `client` - The HTTP client to use for the request
/// * `method` - HTTP method
/// * `url` - Full URL to request
/// * `headers` - Vector of (header_name, header_value) tuples
/// * `body` - Parameters and their encoding
pub async fn make_http_request(
    client: &Client,
    method: Method,
    url: Url,
    headers: Vec<(&str, &str)>,
    body: &RequestBody,
) -> Result<Response, AppError> {
    debug!("{} {}", method, url);

    let mut request = client.request(method, url);
    for (name, value) in headers {
        request = request.header(name, value);
    }

    request = match body {
        RequestBody::Empty => request,
        RequestBody::Form(params) => request.form(params),
        RequestBody::Query(params) => request.query(params),
        RequestBody::Json(value) => request
            .header(CONTENT_TYPE, "application/json")
            .json(value),
    };

    let response = request.send().await?;
    debug!("Response status: {}", response.status());
    Ok(response)
}
