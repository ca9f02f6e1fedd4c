/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Error type shared by every layer of the portal client

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the library
///
/// Callers are expected to match on the variant to decide on remediation:
/// re-authenticate on [`AppError::Authentication`], pick another team on
/// [`AppError::NoAccess`], and so on. Nothing in the client swallows an
/// error to produce a partial result.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad credentials, or the session cookie never showed up after the
    /// single login re-attempt
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The authenticated account is not a member of any team
    #[error("no access: {0}")]
    NoAccess(String),

    /// The portal answered with a non-success envelope
    #[error("request failed: {0}")]
    Request(String),

    /// Transport succeeded but the payload is not what was asked for.
    /// Carries the raw body for diagnosis.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Network or timeout failure reported by the transport
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status without a readable envelope
    #[error("unexpected status code: {0}")]
    Unexpected(StatusCode),

    /// JSON decoding failure
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML property list decoding failure
    #[error("plist error: {0}")]
    Plist(#[from] plist::Error),

    /// Terminal IO failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller supplied an argument the portal would reject
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Whether re-authenticating could resolve the failure
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, AppError::Authentication(_))
    }
}
