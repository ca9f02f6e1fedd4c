use crate::error::AppError;
use crate::model::requests::{Platform, ProfileRequest};
use async_trait::async_trait;
use serde_json::Value;

/// Interface for the provisioning profile service
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Lists profiles through the paginated web listing, inactive ones included
    async fn provisioning_profiles(&self, platform: Platform) -> Result<Vec<Value>, AppError>;

    /// Lists profiles through the IDE host
    ///
    /// Single request, XML property list response. Each record already
    /// carries its app identifier, so no detail call is needed afterwards.
    async fn provisioning_profiles_via_xcode(
        &self,
        platform: Platform,
    ) -> Result<Vec<Value>, AppError>;

    /// Gets the full record of one profile
    async fn provisioning_profile_details(
        &self,
        profile_id: &str,
        platform: Platform,
    ) -> Result<Value, AppError>;

    /// Creates a profile
    async fn create_provisioning_profile(
        &self,
        request: &ProfileRequest,
    ) -> Result<Value, AppError>;

    /// Downloads the raw profile property list
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - Profile bytes, unmodified
    /// * `Err(AppError::UnexpectedResponse)` - The body is not a profile;
    ///   the error carries the received body
    async fn download_provisioning_profile(
        &self,
        profile_id: &str,
        platform: Platform,
    ) -> Result<Vec<u8>, AppError>;

    /// Deletes a profile
    async fn delete_provisioning_profile(
        &self,
        profile_id: &str,
        platform: Platform,
    ) -> Result<Value, AppError>;

    /// Regenerates an existing profile with new contents
    async fn repair_provisioning_profile(
        &self,
        profile_id: &str,
        request: &ProfileRequest,
    ) -> Result<Value, AppError>;
}
