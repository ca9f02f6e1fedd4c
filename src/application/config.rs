use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_SIGN_IN_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_XCODE_BASE_URL,
};
use crate::utils::config::{get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Authentication credentials for the developer portal
pub struct Credentials {
    /// Apple ID used to sign in
    pub username: String,
    /// Password for the Apple ID, never serialized
    #[serde(skip_serializing, default)]
    pub password: String,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Endpoints and transport settings of the portal
pub struct PortalConfig {
    /// Versioned base URL of the account services
    pub base_url: String,
    /// Versioned base URL of the services host used by the IDE
    pub xcode_base_url: String,
    /// Apple ID sign-in endpoint
    pub sign_in_url: String,
    /// Widget key sent with the sign-in request, if the endpoint needs one
    pub widget_key: Option<String>,
    /// Timeout in seconds for every request
    pub timeout: u64,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration for the portal client
pub struct Config {
    /// Authentication credentials
    pub credentials: Credentials,
    /// Portal endpoints
    pub portal: PortalConfig,
    /// Team to operate on. When unset the client picks one after login.
    pub team_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a new configuration from the environment
    ///
    /// Loads a `.env` file first when one is present. Recognised variables:
    /// `DEVPORTAL_USER`, `DEVPORTAL_PASSWORD`, `DEVPORTAL_TEAM_ID`,
    /// `DEVPORTAL_BASE_URL`, `DEVPORTAL_XCODE_BASE_URL`,
    /// `DEVPORTAL_SIGN_IN_URL`, `DEVPORTAL_WIDGET_KEY` and `DEVPORTAL_TIMEOUT`.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let username = get_env_or_default("DEVPORTAL_USER", String::from("default_username"));
        let password = get_env_or_default("DEVPORTAL_PASSWORD", String::from("default_password"));

        if username == "default_username" {
            error!("DEVPORTAL_USER not found in environment variables or .env file");
        }
        if password == "default_password" {
            error!("DEVPORTAL_PASSWORD not found in environment variables or .env file");
        }

        Config {
            credentials: Credentials { username, password },
            portal: PortalConfig {
                base_url: get_env_or_default("DEVPORTAL_BASE_URL", DEFAULT_BASE_URL.to_string()),
                xcode_base_url: get_env_or_default(
                    "DEVPORTAL_XCODE_BASE_URL",
                    DEFAULT_XCODE_BASE_URL.to_string(),
                ),
                sign_in_url: get_env_or_default(
                    "DEVPORTAL_SIGN_IN_URL",
                    DEFAULT_SIGN_IN_URL.to_string(),
                ),
                widget_key: get_env_or_none("DEVPORTAL_WIDGET_KEY"),
                timeout: get_env_or_default("DEVPORTAL_TIMEOUT", DEFAULT_TIMEOUT_SECS),
            },
            team_id: get_env_or_none("DEVPORTAL_TEAM_ID"),
        }
    }

    /// Replaces the credentials
    #[must_use]
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        self
    }

    /// Points the account services at another base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.portal.base_url = base_url.to_string();
        self
    }

    /// Points the IDE services at another base URL
    #[must_use]
    pub fn with_xcode_base_url(mut self, xcode_base_url: &str) -> Self {
        self.portal.xcode_base_url = xcode_base_url.to_string();
        self
    }

    /// Fixes the team up front, skipping automatic selection
    #[must_use]
    pub fn with_team_id(mut self, team_id: &str) -> Self {
        self.team_id = Some(team_id.to_string());
        self
    }
}
