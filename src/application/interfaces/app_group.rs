use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// Interface for the app group service
///
/// App groups only exist on the `ios` endpoints.
#[async_trait]
pub trait AppGroupService: Send + Sync {
    /// Lists every app group
    async fn app_groups(&self) -> Result<Vec<Value>, AppError>;

    /// Registers an app group; the display name is sanitized first
    ///
    /// # Arguments
    /// * `name` - Display name
    /// * `group_id` - Group identifier, e.g. `group.com.example.shared`
    async fn create_app_group(&self, name: &str, group_id: &str) -> Result<Value, AppError>;

    /// Deletes an app group
    async fn delete_app_group(&self, app_group_id: &str) -> Result<Value, AppError>;
}
