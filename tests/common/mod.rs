#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use outlink::infrastructure::Storage;
use outlink::routes::app_routes;
use outlink::state::{AppState, ServiceOptions};
use serde_json::{Value, json};
use sqlx::PgPool;
use std::net::SocketAddr;
use tower::Layer;

pub const TEST_SECRET: &str = "test-signing-secret-0123456789abcdef";

/// Inserts a fixed peer address so per-IP rate limiting has a key.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

pub fn test_options() -> ServiceOptions {
    ServiceOptions {
        auth_token_secret: TEST_SECRET.to_string(),
        auth_token_ttl_hours: 1,
        cookie_secure: false,
        slug_generation_attempts: 5,
        resolve_retry_attempts: 3,
    }
}

pub fn create_test_state() -> AppState {
    AppState::new(Storage::in_memory(), &test_options())
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    AppState::new(Storage::postgres(pool), &test_options())
}

/// Full application router over `state`, as served in production minus
/// path normalization.
pub fn make_server(state: AppState) -> TestServer {
    let app = app_routes(state, false).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

/// Registers an account and returns its session token.
pub async fn register(server: &TestServer, email: &str, domain: Option<&str>) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Test User",
            "email": email,
            "password": "password123",
            "domain": domain,
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Creates a link and returns the response body.
pub async fn create_link(server: &TestServer, token: &str, body: Value) -> Value {
    let response = server
        .post("/api/links")
        .add_header("Authorization", bearer(token))
        .json(&body)
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
