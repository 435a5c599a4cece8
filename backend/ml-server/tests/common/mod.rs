#![allow(dead_code)]

//! Test infrastructure for ml-server API tests

use ml_mailer::{
    BroadcastDispatcher, CancellationRegistry, DispatcherSettings, LogTransport, SendRateLimiter,
};
use ml_server::{AppState, auth::AdminCredentials};

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "s3cret";
pub const TEST_DOMAIN: &str = "mail.example.com";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    // One connection so every query sees the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    ml_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn test_dispatcher(outbound_domain: Option<&str>) -> BroadcastDispatcher {
    let limiter = SendRateLimiter::per_second(NonZeroU32::MIN, NonZeroU32::MIN);
    BroadcastDispatcher::new(
        CancellationRegistry::new(),
        Arc::new(limiter),
        Arc::new(LogTransport::new()),
        DispatcherSettings {
            outbound_domain: outbound_domain.map(str::to_string),
            sender_prefix: "mailer".to_string(),
            // Long enough that nothing is sent while a test runs
            grace_period: Duration::from_secs(3600),
        },
    )
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    create_test_app_state_with_domain(Some(TEST_DOMAIN)).await
}

pub async fn create_test_app_state_with_domain(outbound_domain: Option<&str>) -> AppState {
    AppState {
        pool: create_test_pool().await,
        dispatcher: test_dispatcher(outbound_domain),
        admin: Arc::new(AdminCredentials::new(
            ADMIN_USER.to_string(),
            ADMIN_PASS.to_string(),
        )),
        public_url: Some("https://lists.example.com".to_string()),
        prometheus: None,
    }
}

/// Create a test list, returning its id
pub async fn create_test_list(pool: &SqlitePool, name: &str) -> i64 {
    ml_db::MailingListRepository::new(pool.clone())
        .create(name, "A test list")
        .await
        .expect("Failed to create test list")
}

/// Subscribe `email` to the list, returning the unsubscribe token
pub async fn create_test_subscriber(pool: &SqlitePool, list_id: i64, email: &str) -> String {
    ml_db::SubscriptionRepository::new(pool.clone())
        .subscribe(list_id, email)
        .await
        .expect("Failed to subscribe")
        .unsub_token
}

pub fn basic_auth(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}

/// Request builder with valid admin credentials
pub fn admin_request(method: &str, uri: &str) -> http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth(ADMIN_USER, ADMIN_PASS))
}

pub fn admin_form(uri: &str, form: &str) -> Request<Body> {
    admin_request("POST", uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
