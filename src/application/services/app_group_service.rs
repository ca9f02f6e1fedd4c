use crate::application::client::Client;
use crate::application::csrf::ResourceKind;
use crate::application::interfaces::app_group::AppGroupService;
use crate::error::AppError;
use crate::model::requests::FormParams;
use crate::utils::naming::valid_name_for;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

#[async_trait]
impl AppGroupService for Client {
    async fn app_groups(&self) -> Result<Vec<Value>, AppError> {
        info!("Listing app groups");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("sort", "name=asc");
        self.paged(
            "account/ios/identifiers/listApplicationGroups.action",
            params,
            "applicationGroupList",
        )
        .await
    }

    async fn create_app_group(&self, name: &str, group_id: &str) -> Result<Value, AppError> {
        info!("Creating app group {}", group_id);
        self.ensure_csrf(ResourceKind::AppGroup).await?;

        let params = FormParams::new()
            .with("name", valid_name_for(name))
            .with("identifier", group_id)
            .with("teamId", self.team_id().await?);
        self.post_form(
            "account/ios/identifiers/addApplicationGroup.action",
            params,
            Some("applicationGroup"),
        )
        .await
    }

    async fn delete_app_group(&self, app_group_id: &str) -> Result<Value, AppError> {
        info!("Deleting app group {}", app_group_id);
        self.ensure_csrf(ResourceKind::AppGroup).await?;

        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("applicationGroup", app_group_id);
        self.post_form(
            "account/ios/identifiers/deleteApplicationGroup.action",
            params,
            None,
        )
        .await
    }
}
