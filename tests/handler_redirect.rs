mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_redirect_success() {
    let server = common::make_server(common::create_test_state());
    let token = common::register(&server, "ann@example.com", None).await;
    common::create_link(
        &server,
        &token,
        json!({ "url": "https://example.com/target", "slug": "redirect1" }),
    )
    .await;

    let response = server.get("/r/redirect1").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
    assert_eq!(response.header("referrer-policy"), "no-referrer");
    assert_eq!(response.header("cache-control"), "no-store");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let server = common::make_server(common::create_test_state());

    let response = server.get("/r/nonexistent").await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_counts_clicks() {
    let server = common::make_server(common::create_test_state());
    let token = common::register(&server, "ann@example.com", None).await;
    common::create_link(
        &server,
        &token,
        json!({ "url": "https://example.com", "slug": "counted" }),
    )
    .await;

    for _ in 0..3 {
        server.get("/r/counted").await;
    }
    server.get("/r/missing").await;

    let list = server
        .get("/api/links")
        .add_header("Authorization", common::bearer(&token))
        .await
        .json::<Value>();
    assert_eq!(list["items"][0]["clicks"], 3);
}

#[tokio::test]
async fn test_domain_redirect_requires_matching_domain() {
    let server = common::make_server(common::create_test_state());
    let token = common::register(&server, "shop@example.com", Some("shop")).await;
    let link = common::create_link(
        &server,
        &token,
        json!({ "url": "https://shop.example.com/sale", "slug": "promo1", "domain": "shop" }),
    )
    .await;
    assert_eq!(link["path"], "/shop/promo1");

    let scoped = server.get("/shop/promo1").await;
    assert_eq!(scoped.status_code(), 307);
    assert_eq!(scoped.header("location"), "https://shop.example.com/sale");

    server.get("/other/promo1").await.assert_status_not_found();

    // The global namespace matches regardless of domain.
    let global = server.get("/r/promo1").await;
    assert_eq!(global.status_code(), 307);
}

#[tokio::test]
async fn test_domain_redirect_ignores_unscoped_links() {
    let server = common::make_server(common::create_test_state());
    let token = common::register(&server, "ann@example.com", Some("ann")).await;
    common::create_link(
        &server,
        &token,
        json!({ "url": "https://example.com", "slug": "plain" }),
    )
    .await;

    server.get("/ann/plain").await.assert_status_not_found();
}

#[tokio::test]
async fn test_resolve_returns_url_and_counts_click() {
    let server = common::make_server(common::create_test_state());
    let token = common::register(&server, "shop@example.com", Some("shop")).await;
    common::create_link(
        &server,
        &token,
        json!({ "url": "https://example.com/a", "slug": "abc", "domain": "shop" }),
    )
    .await;

    let response = server.get("/api/resolve/abc").add_query_param("domain", "shop").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["url"], "https://example.com/a");

    let response = server.get("/api/resolve/abc").await;
    assert_eq!(response.json::<Value>()["url"], "https://example.com/a");

    let list = server
        .get("/api/links")
        .add_header("Authorization", common::bearer(&token))
        .await
        .json::<Value>();
    assert_eq!(list["items"][0]["clicks"], 2);
}

#[tokio::test]
async fn test_resolve_miss_is_null() {
    let server = common::make_server(common::create_test_state());
    let token = common::register(&server, "shop@example.com", Some("shop")).await;
    common::create_link(
        &server,
        &token,
        json!({ "url": "https://example.com/a", "slug": "abc", "domain": "shop" }),
    )
    .await;

    let unknown = server.get("/api/resolve/nope").await;
    unknown.assert_status_ok();
    assert_eq!(unknown.json::<Value>()["url"], Value::Null);

    let wrong_domain = server
        .get("/api/resolve/abc")
        .add_query_param("domain", "elsewhere")
        .await;
    assert_eq!(wrong_domain.status_code(), StatusCode::OK);
    assert_eq!(wrong_domain.json::<Value>()["url"], Value::Null);
}

#[tokio::test]
async fn test_resolve_empty_domain_means_unscoped() {
    let server = common::make_server(common::create_test_state());
    let token = common::register(&server, "shop@example.com", Some("shop")).await;
    common::create_link(
        &server,
        &token,
        json!({ "url": "https://example.com/a", "slug": "abc", "domain": "shop" }),
    )
    .await;

    let response = server
        .get("/api/resolve/abc")
        .add_query_param("domain", "")
        .await;
    assert_eq!(response.json::<Value>()["url"], "https://example.com/a");
}
