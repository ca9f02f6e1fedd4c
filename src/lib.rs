//! # devportal-client
//!
//! Client for the session based web API of the developer account portal:
//! app identifiers, website push identifiers, app groups, devices,
//! certificates, provisioning profiles and team members.
//!
//! ## Session lifecycle
//!
//! * **Login**: credentials are exchanged for session cookies through an
//!   [`application::auth::IdentityProvider`]. When the authenticated marker
//!   cookie is missing after the first exchange, the credentials are sent
//!   exactly once more.
//! * **Team**: every call is scoped to a team. Unless one is configured or
//!   selected, the first team sorted by name then identifier is used.
//! * **Anti-forgery tokens**: mutating calls need a token primed by reading
//!   the same resource family twice. Tokens are cached per family until
//!   [`application::client::Client::clear_csrf_cache`].
//! * **Pagination**: listings are collected eagerly, page by page.
//!
//! ## Example
//!
//! ```rust,no_run
//! use devportal_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     setup_logger();
//!     let client = Client::new(Config::new()).await?;
//!     info!("Using team {}", client.team_id().await?);
//!
//!     let app = client
//!         .create_app(&NewApp::explicit("My App", "com.example.myapp"))
//!         .await?;
//!     info!("Created {}", app);
//!     Ok(())
//! }
//! ```

/// Login, session, token cache, pagination and resource services
pub mod application;
/// Global constants
pub mod constants;
/// Error type of the library
pub mod error;
/// Request dispatch and wire models
pub mod model;
/// Commonly used imports
pub mod prelude;
/// Environment, logging and naming helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
