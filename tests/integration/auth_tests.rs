use crate::common::{self, FakeSignIn};
use devportal_client::prelude::*;
use mockito::{Matcher, Server};

#[tokio::test]
async fn test_login_single_attempt_with_marker_cookie() {
    let server = Server::new_async().await;
    let provider = Arc::new(FakeSignIn::new(1));

    let client = Client::with_provider(common::test_config(&server), provider.clone())
        .await
        .unwrap();

    assert_eq!(provider.attempts(), 1);
    assert!(client.cookie_header().unwrap().contains("myacinfo="));
    assert!(client.logged_in_at().await.is_some());
}

#[tokio::test]
async fn test_login_resends_credentials_exactly_once() {
    let server = Server::new_async().await;
    let provider = Arc::new(FakeSignIn::new(2));

    Client::with_provider(common::test_config(&server), provider.clone())
        .await
        .unwrap();

    assert_eq!(provider.attempts(), 2);
}

#[tokio::test]
async fn test_login_fails_when_second_attempt_lacks_marker() {
    let server = Server::new_async().await;
    let provider = Arc::new(FakeSignIn::new(u32::MAX));

    let result = Client::with_provider(common::test_config(&server), provider.clone()).await;

    assert!(matches!(result, Err(AppError::Authentication(_))));
    assert_eq!(provider.attempts(), 2);
}

#[tokio::test]
async fn test_apple_id_sign_in_two_step_flow() {
    let mut server = Server::new_async().await;

    // First exchange: only the partial cookie.
    let partial = server
        .mock("POST", "/appleauth/auth/signin")
        .match_header("cookie", Matcher::Missing)
        .match_header("x-requested-with", "XMLHttpRequest")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "accountName": "dev@example.com",
            "password": "secret",
            "rememberMe": true
        })))
        .with_status(409)
        .with_header("set-cookie", "DES5c148586=partial; Path=/")
        .expect(1)
        .create_async()
        .await;

    // Second exchange carries the partial cookie and gets the full one.
    let full = server
        .mock("POST", "/appleauth/auth/signin")
        .match_header("cookie", Matcher::Regex("DES5c148586=partial".to_string()))
        .with_status(200)
        .with_header("set-cookie", "myacinfo=authenticated; Path=/")
        .expect(1)
        .create_async()
        .await;

    let client = Client::new(common::test_config(&server)).await.unwrap();

    partial.assert_async().await;
    full.assert_async().await;
    assert!(client.cookie_header().unwrap().contains("myacinfo=authenticated"));
}

#[tokio::test]
async fn test_apple_id_sign_in_rejects_bad_credentials() {
    let mut server = Server::new_async().await;
    let rejected = server
        .mock("POST", "/appleauth/auth/signin")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let result = Client::new(common::test_config(&server)).await;

    rejected.assert_async().await;
    match result {
        Err(AppError::Authentication(message)) => {
            assert_eq!(message, "invalid username and password combination")
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("login should fail"),
    }
}
