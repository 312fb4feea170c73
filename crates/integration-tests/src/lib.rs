//! Integration tests for Shoplist.
//!
//! Each test spawns the full application on an ephemeral port with a
//! fresh in-process store and a temporary upload directory, then drives
//! it over HTTP with `reqwest` — the same surface a real client sees.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shoplist-integration-tests
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

use secrecy::SecretString;
use serde_json::Value;

use shoplist_server::{app, config::ServerConfig, state::AppState};

/// Signing secret shared between the spawned server and tests that need
/// to mint their own tokens.
pub const JWT_SECRET: &str = "mJ4vQ8xW2kR6tB0yN5cS9dF3gH7pZ1aL";

/// A running server instance plus a client to talk to it.
pub struct TestContext {
    /// HTTP client for driving the server.
    pub client: reqwest::Client,
    /// Base URL of the spawned server, e.g. `http://127.0.0.1:49152`.
    pub base_url: String,
    /// Application state shared with the spawned server.
    pub state: AppState,
    _uploads: tempfile::TempDir,
}

impl TestContext {
    /// Spawn the application on an ephemeral port.
    pub async fn spawn() -> Self {
        let uploads = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            jwt_secret: SecretString::from(JWT_SECRET),
            token_ttl_days: 7,
            upload_dir: uploads.path().to_path_buf(),
        };

        let state = AppState::new(config);
        let router = app(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            state,
            _uploads: uploads,
        }
    }

    /// Absolute URL for a server path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register a user and return the issued token plus the user object.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> (String, Value) {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201, "registration should succeed");

        let body: Value = response.json().await.unwrap();
        let token = body["token"].as_str().unwrap().to_owned();
        (token, body["user"].clone())
    }

    /// Create a shopping list and return its JSON representation.
    pub async fn create_list(&self, token: &str, name: &str) -> Value {
        let response = self
            .client
            .post(self.url("/api/shopping-lists"))
            .bearer_auth(token)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201, "list creation should succeed");

        let body: Value = response.json().await.unwrap();
        body["data"].clone()
    }

    /// Add a product via JSON and return the updated list.
    pub async fn add_product(&self, token: &str, list_id: &str, name: &str, quantity: u32) -> Value {
        let response = self
            .client
            .post(self.url(&format!("/api/shopping-lists/{list_id}/products")))
            .bearer_auth(token)
            .json(&serde_json::json!({ "name": name, "quantity": quantity }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201, "product creation should succeed");

        let body: Value = response.json().await.unwrap();
        body["data"].clone()
    }
}
