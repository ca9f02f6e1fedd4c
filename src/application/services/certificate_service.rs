use crate::application::client::Client;
use crate::application::csrf::ResourceKind;
use crate::application::interfaces::certificate::CertificateService;
use crate::constants::CERTIFICATE_MARKER;
use crate::error::AppError;
use crate::model::requests::{FormParams, Platform};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

#[async_trait]
impl CertificateService for Client {
    async fn certificates(
        &self,
        type_ids: &[&str],
        platform: Platform,
    ) -> Result<Vec<Value>, AppError> {
        info!("Listing {} certificates", platform);
        let path = format!("account/{platform}/certificate/listCertRequests.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("types", type_ids.join(","))
            .with("sort", "certRequestStatusCode=asc");

        let certificates = self.paged(&path, params, "certRequests").await?;
        debug!("Certificates obtained: {}", certificates.len());
        Ok(certificates)
    }

    async fn create_certificate(
        &self,
        type_id: &str,
        csr: &str,
        app_id: Option<&str>,
        platform: Platform,
    ) -> Result<Value, AppError> {
        info!("Submitting certificate request of type {}", type_id);
        self.ensure_csrf(ResourceKind::Certificate).await?;

        let path = format!("account/{platform}/certificate/submitCertificateRequest.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("type", type_id)
            .with("csrContent", csr)
            .with_opt("appIdId", app_id);
        self.post_form(&path, params, Some("certRequest")).await
    }

    async fn download_certificate(
        &self,
        certificate_id: &str,
        type_id: &str,
        platform: Platform,
    ) -> Result<Vec<u8>, AppError> {
        if certificate_id.is_empty() || type_id.is_empty() {
            return Err(AppError::InvalidInput(
                "certificate id and type must not be empty".to_string(),
            ));
        }
        info!("Downloading certificate {}", certificate_id);

        let path = format!("account/{platform}/certificate/downloadCertificateContent.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("certificateId", certificate_id)
            .with("type", type_id);
        self.http()
            .download(&path, params, CERTIFICATE_MARKER)
            .await
    }

    async fn revoke_certificate(
        &self,
        certificate_id: &str,
        type_id: &str,
        platform: Platform,
    ) -> Result<Value, AppError> {
        info!("Revoking certificate {}", certificate_id);
        self.ensure_csrf(ResourceKind::Certificate).await?;

        let path = format!("account/{platform}/certificate/revokeCertificate.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("certificateId", certificate_id)
            .with("type", type_id);
        self.post_form(&path, params, Some("certRequests")).await
    }
}
