use crate::error::AppError;
use crate::model::requests::{AppFeature, NewApp, Platform};
use async_trait::async_trait;
use serde_json::Value;

/// Interface for the app identifier service
#[async_trait]
pub trait AppService: Send + Sync {
    /// Lists every app identifier of the platform, sorted by name
    async fn apps(&self, platform: Platform) -> Result<Vec<Value>, AppError>;

    /// Gets the full record of one app identifier
    ///
    /// # Arguments
    /// * `app_id` - Internal app identifier (`appIdId`)
    /// * `platform` - Platform the identifier belongs to
    async fn app_details(&self, app_id: &str, platform: Platform) -> Result<Value, AppError>;

    /// Registers a new app identifier
    ///
    /// The display name is sanitized first. Explicit identifiers get push,
    /// in-app purchase and Game Center enabled on top of `enable_services`.
    ///
    /// # Returns
    /// * The created `appId` record
    async fn create_app(&self, app: &NewApp) -> Result<Value, AppError>;

    /// Renames an app identifier; the new name is sanitized first
    async fn update_app_name(
        &self,
        app_id: &str,
        name: &str,
        platform: Platform,
    ) -> Result<Value, AppError>;

    /// Deletes an app identifier
    async fn delete_app(&self, app_id: &str, platform: Platform) -> Result<Value, AppError>;

    /// Turns one feature on or off, then returns the refreshed details
    async fn update_service(
        &self,
        app_id: &str,
        platform: Platform,
        feature: &AppFeature,
    ) -> Result<Value, AppError>;

    /// Assigns app groups to an iOS app identifier, then returns the refreshed details
    async fn associate_groups(&self, app_id: &str, group_ids: &[&str]) -> Result<Value, AppError>;
}
