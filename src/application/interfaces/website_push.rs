use crate::error::AppError;
use crate::model::requests::Platform;
use async_trait::async_trait;
use serde_json::Value;

/// Interface for the website push identifier service
#[async_trait]
pub trait WebsitePushService: Send + Sync {
    /// Lists every website push identifier of the platform
    async fn website_pushes(&self, platform: Platform) -> Result<Vec<Value>, AppError>;

    /// Registers a website push identifier
    async fn create_website_push(
        &self,
        name: &str,
        bundle_id: &str,
        platform: Platform,
    ) -> Result<Value, AppError>;

    /// Deletes a website push identifier
    async fn delete_website_push(
        &self,
        website_push_id: &str,
        platform: Platform,
    ) -> Result<Value, AppError>;
}
