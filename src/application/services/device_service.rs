use crate::application::client::Client;
use crate::application::csrf::ResourceKind;
use crate::application::interfaces::device::DeviceService;
use crate::error::AppError;
use crate::model::requests::{FormParams, Platform};
use crate::model::responses::into_records;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

#[async_trait]
impl DeviceService for Client {
    async fn devices(
        &self,
        platform: Platform,
        include_disabled: bool,
    ) -> Result<Vec<Value>, AppError> {
        info!("Listing {} devices", platform);
        let path = format!("account/{platform}/device/listDevices.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("sort", "name=asc")
            .with("includeRemovedDevices", include_disabled);

        let devices = self.paged(&path, params, "devices").await?;
        debug!("Devices obtained: {}", devices.len());
        Ok(devices)
    }

    async fn devices_by_class(
        &self,
        device_class: &str,
        include_disabled: bool,
    ) -> Result<Vec<Value>, AppError> {
        info!("Listing {} devices", device_class);
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("sort", "name=asc")
            .with("deviceClasses", device_class)
            .with("includeRemovedDevices", include_disabled);
        self.paged("account/ios/device/listDevices.action", params, "devices")
            .await
    }

    async fn create_device(
        &self,
        name: &str,
        udid: &str,
        platform: Platform,
    ) -> Result<Value, AppError> {
        info!("Registering device {}", name);
        self.ensure_csrf(ResourceKind::Device).await?;

        let path = format!("account/{platform}/device/addDevices.action");
        let device_class = if platform.is_mac() { "mac" } else { "iphone" };
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("deviceClasses", device_class)
            .with("deviceNumbers", udid)
            .with("deviceNames", name)
            .with("register", "single");

        let devices = into_records(self.post_form(&path, params, Some("devices")).await?)?;
        devices.into_iter().next().ok_or_else(|| {
            AppError::UnexpectedResponse(format!("no device returned for {udid}"))
        })
    }

    async fn disable_device(
        &self,
        device_id: &str,
        udid: &str,
        platform: Platform,
    ) -> Result<Value, AppError> {
        info!("Disabling device {} ({})", device_id, udid);
        self.ensure_csrf(ResourceKind::Device).await?;

        let path = format!("account/{platform}/device/deleteDevice.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("deviceId", device_id);
        self.post_form(&path, params, None).await
    }

    async fn enable_device(
        &self,
        device_id: &str,
        udid: &str,
        platform: Platform,
    ) -> Result<Value, AppError> {
        info!("Enabling device {} ({})", device_id, udid);
        self.ensure_csrf(ResourceKind::Device).await?;

        let path = format!("account/{platform}/device/enableDevice.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("displayId", device_id)
            .with("deviceNumber", udid);
        self.post_form(&path, params, Some("device")).await
    }
}
