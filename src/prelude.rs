/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # Developer Portal Client Prelude
//!
//! Brings the commonly used types and service traits into scope with a
//! single import.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use devportal_client::prelude::*;
//!
//! # async fn run() -> Result<(), AppError> {
//! let client = Client::new(Config::new()).await?;
//! let apps = client.apps(Platform::Ios).await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration of the portal client
pub use crate::application::config::{Config, Credentials, PortalConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::AppError;

// ============================================================================
// AUTHENTICATION AND SESSION MANAGEMENT
// ============================================================================

/// Identity providers and the login manager
pub use crate::application::auth::{AppleIdSignIn, Auth, IdentityProvider};

/// Signed-in client
pub use crate::application::client::Client;

/// Session state
pub use crate::application::session::Session;

/// Team selection
pub use crate::application::team_selector::{TeamSelector, TerminalTeamSelector};

// ============================================================================
// SERVICES (TRAITS)
// ============================================================================

/// One trait per resource family, all implemented by `Client`
pub use crate::application::interfaces::{
    AppGroupService, AppService, CertificateService, DeviceService, ProfileService, TeamService,
    WebsitePushService,
};

// ============================================================================
// CORE MECHANICS
// ============================================================================

/// Anti-forgery token cache
pub use crate::application::csrf::{CsrfCache, CsrfPrimer, CsrfTokens, ResourceKind};

/// Pagination
pub use crate::application::pagination::{Page, collect_pages};

/// Request dispatch
pub use crate::model::http::{HttpClient, RequestBody};

// ============================================================================
// MODELS
// ============================================================================

/// Request parameters
pub use crate::model::requests::{AppFeature, AppType, FormParams, NewApp, Platform, ProfileRequest};

/// Response models
pub use crate::model::responses::{Team, TeamType};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Display name sanitization
pub use crate::utils::naming::valid_name_for;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use serde_json::Value;
pub use std::sync::Arc;
pub use tracing::{debug, error, info, warn};
