mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_add_and_list_domains() {
    let server = common::make_server(common::create_test_state());
    let token = common::register(&server, "ann@example.com", Some("first")).await;

    let response = server
        .post("/api/domains")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "domain": "second" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["items"], json!(["first", "second"]));

    let list = server
        .get("/api/domains")
        .add_header("Authorization", common::bearer(&token))
        .await;
    list.assert_status_ok();
    assert_eq!(list.json::<Value>()["items"], json!(["first", "second"]));
}

#[tokio::test]
async fn test_add_domain_taken_by_other_user() {
    let server = common::make_server(common::create_test_state());
    common::register(&server, "ann@example.com", Some("shop")).await;
    let bob = common::register(&server, "bob@example.com", None).await;

    let response = server
        .post("/api/domains")
        .add_header("Authorization", common::bearer(&bob))
        .json(&json!({ "domain": "shop" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "domain_taken");
}

#[tokio::test]
async fn test_add_domain_rejects_invalid_names() {
    let server = common::make_server(common::create_test_state());
    let token = common::register(&server, "ann@example.com", None).await;

    for name in ["", "api", "r", "health", "has space", "a/b"] {
        let response = server
            .post("/api/domains")
            .add_header("Authorization", common::bearer(&token))
            .json(&json!({ "domain": name }))
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_list_domains_requires_session() {
    let server = common::make_server(common::create_test_state());

    server.get("/api/domains").await.assert_status_unauthorized();
}
