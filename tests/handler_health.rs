mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, _rx) = common::make_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["click_queue"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_degraded_when_click_queue_closed() {
    let (state, rx, _repos) = common::create_test_state();
    drop(rx);
    let server =
        axum_test::TestServer::new(locallinks::routes::router(state, false)).unwrap();

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["click_queue"]["status"], "error");
}
