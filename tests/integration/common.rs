// Common utilities for integration tests

use devportal_client::prelude::*;
use mockito::{Mock, Server};
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};

/// Identity provider that plants session cookies without any network call
pub struct FakeSignIn {
    /// Attempt from which the authenticated marker cookie is set
    pub marker_from: u32,
    /// Login requests sent so far
    pub attempts: AtomicU32,
}

impl FakeSignIn {
    pub fn new(marker_from: u32) -> Self {
        Self {
            marker_from,
            attempts: AtomicU32::new(0),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeSignIn {
    async fn send_login_request(
        &self,
        http: &HttpClient,
        _username: &str,
        _password: &str,
    ) -> Result<(), AppError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        let url = http.base_url().clone();
        http.add_cookie("DES5c148586=partial; Path=/", &url);
        if attempt >= self.marker_from {
            http.add_cookie("myacinfo=authenticated; Path=/", &url);
        }
        Ok(())
    }
}

/// Configuration pointing every host at the mock server
pub fn test_config(server: &Server) -> Config {
    setup_logger();
    let mut config = Config::new()
        .with_credentials("dev@example.com", "secret")
        .with_base_url(&server.url())
        .with_xcode_base_url(&format!("{}/xcode", server.url()));
    config.team_id = None;
    config.portal.sign_in_url = format!("{}/appleauth/auth/signin", server.url());
    config.portal.widget_key = None;
    config
}

/// Client signed in through [`FakeSignIn`]
pub async fn signed_in_client(server: &Server) -> Client {
    Client::with_provider(test_config(server), Arc::new(FakeSignIn::new(1)))
        .await
        .expect("fake sign-in never fails")
}

/// Mocks the team list with two teams, "A" (id 1) sorting first
pub async fn mock_teams(server: &mut Server, hits: usize) -> Mock {
    server
        .mock("POST", "/account/listTeams.action")
        .expect(hits)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "resultCode": 0,
                "teams": [
                    {"name": "B", "teamId": "2", "type": "Company/Organization"},
                    {"name": "A", "teamId": "1", "type": "In-House"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await
}

/// Successful envelope around `key: value`
pub fn envelope(key: &str, value: serde_json::Value) -> String {
    let mut body = json!({"resultCode": 0});
    body[key] = value;
    body.to_string()
}
