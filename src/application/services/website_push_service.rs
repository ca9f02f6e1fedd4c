use crate::application::client::Client;
use crate::application::csrf::ResourceKind;
use crate::application::interfaces::website_push::WebsitePushService;
use crate::error::AppError;
use crate::model::requests::{FormParams, Platform};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

#[async_trait]
impl WebsitePushService for Client {
    async fn website_pushes(&self, platform: Platform) -> Result<Vec<Value>, AppError> {
        info!("Listing {} website push identifiers", platform);
        let path = format!("account/{platform}/identifiers/listWebsitePushIds.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("sort", "name=asc");
        self.paged(&path, params, "websitePushIdList").await
    }

    async fn create_website_push(
        &self,
        name: &str,
        bundle_id: &str,
        platform: Platform,
    ) -> Result<Value, AppError> {
        info!("Creating website push identifier {}", bundle_id);
        self.ensure_csrf(ResourceKind::WebsitePush).await?;

        let path = format!("account/{platform}/identifiers/addWebsitePushId.action");
        let params = FormParams::new()
            .with("name", name)
            .with("identifier", bundle_id)
            .with("teamId", self.team_id().await?);
        self.post_form(&path, params, Some("websitePushId")).await
    }

    async fn delete_website_push(
        &self,
        website_push_id: &str,
        platform: Platform,
    ) -> Result<Value, AppError> {
        info!("Deleting website push identifier {}", website_push_id);
        self.ensure_csrf(ResourceKind::WebsitePush).await?;

        let path = format!("account/{platform}/identifiers/deleteWebsitePushId.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("websitePushId", website_push_id);
        self.post_form(&path, params, None).await
    }
}
