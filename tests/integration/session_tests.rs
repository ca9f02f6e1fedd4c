use crate::common;
use devportal_client::prelude::*;
use mockito::{Matcher, Server};
use serde_json::json;

/// Picks the last team it is offered
struct LastTeam;

impl TeamSelector for LastTeam {
    fn select_team(&self, teams: &[Team]) -> Result<String, AppError> {
        teams
            .last()
            .map(|team| team.team_id.clone())
            .ok_or_else(|| AppError::NoAccess("empty".to_string()))
    }
}

#[tokio::test]
async fn test_team_auto_selection_picks_first_by_name() {
    let mut server = Server::new_async().await;
    let teams_mock = common::mock_teams(&mut server, 1).await;
    let client = common::signed_in_client(&server).await;

    assert_eq!(client.team_id().await.unwrap(), "1");
    // Memoized: a second resolution does not list teams again.
    assert_eq!(client.team_id().await.unwrap(), "1");
    let names: Vec<String> = client
        .teams()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, ["A", "B"]);

    teams_mock.assert_async().await;
}

#[tokio::test]
async fn test_configured_team_skips_listing() {
    let mut server = Server::new_async().await;
    let teams_mock = server
        .mock("POST", "/account/listTeams.action")
        .expect(0)
        .create_async()
        .await;

    let config = common::test_config(&server).with_team_id("TEAM9");
    let client = Client::with_provider(config, Arc::new(common::FakeSignIn::new(1)))
        .await
        .unwrap();

    assert_eq!(client.team_id().await.unwrap(), "TEAM9");
    teams_mock.assert_async().await;
}

#[tokio::test]
async fn test_zero_teams_is_no_access_before_any_team_call() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/account/listTeams.action")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"resultCode": 0, "teams": []}).to_string())
        .create_async()
        .await;
    let apps_mock = server
        .mock("POST", Matcher::Regex("listAppIds".to_string()))
        .expect(0)
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;

    assert!(matches!(client.team_id().await, Err(AppError::NoAccess(_))));
    assert!(matches!(
        client.apps(Platform::Ios).await,
        Err(AppError::NoAccess(_))
    ));
    apps_mock.assert_async().await;
}

#[tokio::test]
async fn test_in_house_and_team_information() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    let client = common::signed_in_client(&server).await;

    let team = client.team_information().await.unwrap().unwrap();
    assert_eq!(team.team_id, "1");
    assert!(client.in_house().await.unwrap());

    client.set_team_id("2").await;
    assert!(!client.in_house().await.unwrap());
}

#[tokio::test]
async fn test_select_team_on_request() {
    let mut server = Server::new_async().await;
    common::mock_teams(&mut server, 1).await;
    let client = common::signed_in_client(&server).await;

    let team_id = client.select_team(&LastTeam).await.unwrap();
    assert_eq!(team_id, "2");
    assert_eq!(client.team_id().await.unwrap(), "2");
}

#[tokio::test]
async fn test_invalidate_teams_fetches_again() {
    let mut server = Server::new_async().await;
    let teams_mock = common::mock_teams(&mut server, 2).await;
    let client = common::signed_in_client(&server).await;

    client.teams().await.unwrap();
    client.invalidate_teams().await;
    client.teams().await.unwrap();

    teams_mock.assert_async().await;
}

#[tokio::test]
async fn test_team_listing_without_teams_key_is_no_access() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/account/listTeams.action")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"resultCode": 0}).to_string())
        .create_async()
        .await;

    let client = common::signed_in_client(&server).await;

    assert!(client.teams().await.unwrap().is_empty());
    assert!(matches!(client.team_id().await, Err(AppError::NoAccess(_))));
}
