use crate::application::client::Client;
use crate::application::csrf::ResourceKind;
use crate::application::interfaces::app::AppService;
use crate::error::AppError;
use crate::model::requests::{AppFeature, AppType, FormParams, NewApp, Platform};
use crate::utils::naming::valid_name_for;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

#[async_trait]
impl AppService for Client {
    async fn apps(&self, platform: Platform) -> Result<Vec<Value>, AppError> {
        info!("Listing {} app identifiers", platform);
        let path = format!("account/{platform}/identifiers/listAppIds.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("sort", "name=asc");

        let apps = self.paged(&path, params, "appIds").await?;
        debug!("App identifiers obtained: {}", apps.len());
        Ok(apps)
    }

    async fn app_details(&self, app_id: &str, platform: Platform) -> Result<Value, AppError> {
        debug!("Getting details of app identifier {}", app_id);
        let path = format!("account/{platform}/identifiers/getAppIdDetail.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("appIdId", app_id);
        self.post_form(&path, params, Some("appId")).await
    }

    async fn create_app(&self, app: &NewApp) -> Result<Value, AppError> {
        info!("Creating {} app identifier {}", app.app_type.as_str(), app.bundle_id);
        self.ensure_csrf(ResourceKind::App).await?;

        let mut params = FormParams::new()
            .with("name", valid_name_for(&app.name))
            .with("teamId", self.team_id().await?)
            .with("type", app.app_type.as_str())
            .with("identifier", &app.bundle_id);
        if app.app_type == AppType::Explicit {
            params = params
                .with("push", "on")
                .with("inAppPurchase", "on")
                .with("gameCenter", "on");
        }
        for feature in &app.enable_services {
            params = params.with(&feature.service_id, &feature.value);
        }

        let path = format!("account/{}/identifiers/addAppId.action", app.platform);
        self.post_form(&path, params, Some("appId")).await
    }

    async fn update_app_name(
        &self,
        app_id: &str,
        name: &str,
        platform: Platform,
    ) -> Result<Value, AppError> {
        info!("Renaming app identifier {}", app_id);
        self.ensure_csrf(ResourceKind::App).await?;

        let path = format!("account/{platform}/identifiers/updateAppIdName.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("appIdId", app_id)
            .with("name", valid_name_for(name));
        self.post_form(&path, params, Some("appId")).await
    }

    async fn delete_app(&self, app_id: &str, platform: Platform) -> Result<Value, AppError> {
        info!("Deleting app identifier {}", app_id);
        self.ensure_csrf(ResourceKind::App).await?;

        let path = format!("account/{platform}/identifiers/deleteAppId.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("appIdId", app_id);
        self.post_form(&path, params, None).await
    }

    async fn update_service(
        &self,
        app_id: &str,
        platform: Platform,
        feature: &AppFeature,
    ) -> Result<Value, AppError> {
        info!(
            "Setting {} to {} on app identifier {}",
            feature.service_id, feature.value, app_id
        );
        self.ensure_csrf(ResourceKind::App).await?;

        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("displayId", app_id)
            .with("featureType", &feature.service_id)
            .with("featureValue", &feature.value);
        self.post_form(&feature.service_uri, params, None).await?;

        self.app_details(app_id, platform).await
    }

    async fn associate_groups(&self, app_id: &str, group_ids: &[&str]) -> Result<Value, AppError> {
        info!("Assigning {} app groups to {}", group_ids.len(), app_id);
        self.ensure_csrf(ResourceKind::AppGroup).await?;

        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("appIdId", app_id)
            .with("displayId", app_id)
            .with_many("applicationGroups", group_ids.iter().copied());
        self.post_form(
            "account/ios/identifiers/assignApplicationGroupToAppId.action",
            params,
            None,
        )
        .await?;

        self.app_details(app_id, Platform::Ios).await
    }
}
