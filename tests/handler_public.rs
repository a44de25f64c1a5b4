mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_public_profile_json() {
    let (server, _rx) = common::make_server();
    let token = common::signup(&server, "corner-cafe").await;
    let menu = common::add_link(&server, &token, "Menu", "https://cafe.example/menu").await;

    let response = server.get("/api/profiles/Corner-Cafe").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["slug"], "corner-cafe");
    assert_eq!(json["public_url"], "https://locallinks.test/corner-cafe");
    assert_eq!(json["links"][0]["id"], menu);
    assert_eq!(json["links"][0]["url"], "https://cafe.example/menu");
    assert!(
        json["whatsapp_url"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/")
    );
}

#[tokio::test]
async fn test_public_profile_unknown_slug() {
    let (server, _rx) = common::make_server();

    let response = server.get("/api/profiles/nobody").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_public_page_renders_links_in_order() {
    let (server, _rx) = common::make_server();
    let token = common::signup(&server, "corner-cafe").await;
    let menu = common::add_link(&server, &token, "Menu", "https://cafe.example/menu").await;
    let order = common::add_link(&server, &token, "Order", "https://order.example").await;

    server
        .post("/api/links/reorder")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "source_id": order, "target_id": menu }))
        .await
        .assert_status_ok();

    let response = server.get("/corner-cafe").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Corner Cafe"));
    let order_at = html.find(&format!("/corner-cafe/go/{order}")).unwrap();
    let menu_at = html.find(&format!("/corner-cafe/go/{menu}")).unwrap();
    assert!(order_at < menu_at);
}

#[tokio::test]
async fn test_public_page_unknown_slug() {
    let (server, _rx) = common::make_server();

    server.get("/nobody").await.assert_status_not_found();
}

#[tokio::test]
async fn test_go_redirects_and_queues_click() {
    let (server, mut rx) = common::make_server();
    let token = common::signup(&server, "corner-cafe").await;
    let menu = common::add_link(&server, &token, "Menu", "https://cafe.example/menu").await;

    let response = server.get(&format!("/corner-cafe/go/{menu}")).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://cafe.example/menu");
    assert_eq!(rx.try_recv().unwrap().link_id, menu);
}

#[tokio::test]
async fn test_go_rejects_link_of_other_business() {
    let (server, mut rx) = common::make_server();
    let cafe = common::signup(&server, "corner-cafe").await;
    common::signup(&server, "gym24").await;
    let menu = common::add_link(&server, &cafe, "Menu", "https://cafe.example/menu").await;

    server
        .get(&format!("/gym24/go/{menu}"))
        .await
        .assert_status_not_found();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_click_endpoint_queues_event() {
    let (server, mut rx) = common::make_server();

    let response = server.post("/api/clicks").json(&json!({ "link_id": 7 })).await;

    response.assert_status(StatusCode::ACCEPTED);
    assert_eq!(response.json::<Value>()["queued"], true);
    assert_eq!(rx.try_recv().unwrap().link_id, 7);
}
