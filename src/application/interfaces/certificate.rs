use crate::error::AppError;
use crate::model::requests::Platform;
use async_trait::async_trait;
use serde_json::Value;

/// Interface for the certificate service
#[async_trait]
pub trait CertificateService: Send + Sync {
    /// Lists certificates of the given type identifiers
    async fn certificates(
        &self,
        type_ids: &[&str],
        platform: Platform,
    ) -> Result<Vec<Value>, AppError>;

    /// Submits a certificate signing request
    ///
    /// # Arguments
    /// * `type_id` - Certificate type identifier
    /// * `csr` - PEM encoded signing request
    /// * `app_id` - App identifier, required by push certificates only
    /// * `platform` - Target platform
    async fn create_certificate(
        &self,
        type_id: &str,
        csr: &str,
        app_id: Option<&str>,
        platform: Platform,
    ) -> Result<Value, AppError>;

    /// Downloads the raw certificate content
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - Certificate bytes, unmodified
    /// * `Err(AppError::UnexpectedResponse)` - The body is not a certificate;
    ///   the error carries the received body
    async fn download_certificate(
        &self,
        certificate_id: &str,
        type_id: &str,
        platform: Platform,
    ) -> Result<Vec<u8>, AppError>;

    /// Revokes a certificate
    async fn revoke_certificate(
        &self,
        certificate_id: &str,
        type_id: &str,
        platform: Platform,
    ) -> Result<Value, AppError>;
}
