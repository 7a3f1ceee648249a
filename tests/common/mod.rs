#![allow(dead_code)]

use std::num::NonZeroU32;

use axum_test::TestServer;
use posts_api::{AppState, Config, config::RateLimitConfig, create_app};
use serde_json::{Value, json};
use tempfile::TempDir;

pub fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "test-secret".to_string(),
        token_ttl_hours: 1,
        bcrypt_cost: 4,
        upload_dir: temp_dir.path().join("uploads"),
        max_upload_bytes: 1024 * 1024,
        rate_limit: RateLimitConfig {
            per_second: NonZeroU32::new(1000).unwrap(),
            burst: NonZeroU32::new(1000).unwrap(),
        },
    }
}

pub async fn setup_with_config(temp_dir: TempDir, config: Config) -> (TempDir, TestServer) {
    let state = AppState::new(config);
    state.uploads.ensure_dir().await.unwrap();

    let server = TestServer::new(create_app(state)).unwrap();
    (temp_dir, server)
}

pub async fn setup_test_server() -> (TempDir, TestServer) {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    setup_with_config(temp_dir, config).await
}

/// Sign up a user and return `(token, user id)`.
pub async fn signup(server: &TestServer, email: &str, name: &str) -> (String, String) {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "email": email,
            "name": name,
            "password": "correct horse battery"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}
