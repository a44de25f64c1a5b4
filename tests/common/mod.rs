#![allow(dead_code)]

use axum_test::TestServer;
use locallinks::config::{Config, StorageBackend};
use locallinks::domain::click_event::ClickEvent;
use locallinks::infrastructure::cache::NullCache;
use locallinks::routes::router;
use locallinks::server::{Repositories, build_state};
use locallinks::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::mpsc;

pub fn test_config() -> Config {
    Config {
        storage: StorageBackend::Memory,
        database_url: None,
        redis_url: None,
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        public_base_url: "https://locallinks.test".to_string(),
        click_queue_capacity: 100,
        click_worker_concurrency: 1,
        cache_ttl_seconds: 300,
        token_signing_secret: "test-signing-secret".to_string(),
        rollback_on_failure: false,
        rate_limit: false,
        db_max_connections: 1,
        db_connect_timeout: 1,
        db_idle_timeout: 1,
        db_max_lifetime: 1,
    }
}

/// State over a fresh in-memory store. The click receiver is returned so
/// tests can observe queued events.
pub fn create_test_state() -> (AppState, mpsc::Receiver<ClickEvent>, Repositories) {
    let (tx, rx) = mpsc::channel(100);
    let repos = Repositories::memory();
    let state = build_state(&test_config(), &repos, Arc::new(NullCache::new()), tx);
    (state, rx, repos)
}

pub fn make_server() -> (TestServer, mpsc::Receiver<ClickEvent>) {
    let (state, rx, _repos) = create_test_state();
    (TestServer::new(router(state, false)).unwrap(), rx)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Signs up a business and returns its bearer token.
pub async fn signup(server: &TestServer, slug: &str) -> String {
    let response = server
        .post("/api/signup")
        .json(&json!({
            "name": "Corner Cafe",
            "slug": slug,
            "owner": "owner@example.com",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Appends a link and returns its id.
pub async fn add_link(server: &TestServer, token: &str, title: &str, url: &str) -> i64 {
    let response = server
        .post("/api/links")
        .add_header("Authorization", bearer(token))
        .json(&json!({ "title": title, "url": url }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<Value>()["id"].as_i64().unwrap()
}

/// Link titles of the board in display order.
pub async fn board_titles(server: &TestServer, token: &str) -> Vec<String> {
    let board = server
        .get("/api/links")
        .add_header("Authorization", bearer(token))
        .await
        .json::<Value>();

    board["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap().to_string())
        .collect()
}
