use crate::error::AppError;
use crate::model::requests::Platform;
use async_trait::async_trait;
use serde_json::Value;

/// Interface for the device service
#[async_trait]
pub trait DeviceService: Send + Sync {
    /// Lists registered devices
    ///
    /// # Arguments
    /// * `platform` - Platform the devices belong to
    /// * `include_disabled` - Whether disabled devices are listed too
    async fn devices(&self, platform: Platform, include_disabled: bool)
    -> Result<Vec<Value>, AppError>;

    /// Lists iOS devices of one class, e.g. `iphone`, `ipad`, `watch` or `tvOS`
    async fn devices_by_class(
        &self,
        device_class: &str,
        include_disabled: bool,
    ) -> Result<Vec<Value>, AppError>;

    /// Registers a single device
    ///
    /// # Returns
    /// * The created device record
    async fn create_device(
        &self,
        name: &str,
        udid: &str,
        platform: Platform,
    ) -> Result<Value, AppError>;

    /// Disables a device
    async fn disable_device(
        &self,
        device_id: &str,
        udid: &str,
        platform: Platform,
    ) -> Result<Value, AppError>;

    /// Enables a previously disabled device
    async fn enable_device(
        &self,
        device_id: &str,
        udid: &str,
        platform: Platform,
    ) -> Result<Value, AppError>;
}
