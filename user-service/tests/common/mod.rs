use std::sync::Arc;

use auth::AuthConfig;
use auth::ManualClock;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use user_service::inbound::http::router::create_router;
use user_service::inbound::http::router::AppState;
use user_service::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "testpassword";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_allowed_hosts(&[]).await
    }

    /// Spawn the application behind a `Host` allow-list
    pub async fn spawn_with_allowed_hosts(allowed_hosts: &[&str]) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let auth_config = AuthConfig::new(TEST_SECRET, chrono::Duration::minutes(30))
            .expect("Test auth config should be valid");
        let clock = Arc::new(ManualClock::new(Utc::now()));

        let state = AppState::with_clock(
            Arc::new(InMemoryUserRepository::new()),
            &auth_config,
            clock.clone(),
        );
        let allowed_hosts: Vec<String> = allowed_hosts.iter().map(|h| h.to_string()).collect();
        let router = create_router(state, &[], &allowed_hosts);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
            clock,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user with the shared test password and return the response body
    pub async fn create_user(&self, username: &str, email: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({
                "username": username,
                "email": email,
                "password": TEST_PASSWORD,
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the raw login response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in with the shared test password and return the access token
    pub async fn token_for(&self, email: &str) -> String {
        let response = self.login(email, TEST_PASSWORD).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Token should be a string")
            .to_string()
    }
}
