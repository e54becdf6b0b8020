#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use duewatch_api::config::ServerConfig;
use duewatch_api::router::build_app_router;
use duewatch_api::state::AppState;
use duewatch_notify::{
    Dispatcher, EmailError, EmailSender, LineError, LineSender, LineTransport, NotifyConfig,
};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and leaves the trigger endpoint open unless a secret is supplied.
pub fn test_config(cron_secret: Option<&str>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cron_secret: cron_secret.map(str::to_string),
    }
}

/// Notification configuration with both channels enabled, so router-level
/// tests exercise the same code paths production does.
pub fn test_notify_config() -> NotifyConfig {
    NotifyConfig {
        default_days_before: 3,
        line_channel_token: Some("test-channel-token".to_string()),
        resend_api_key: Some("test-resend-key".to_string()),
        from_email: "notify@resend.dev".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Mock senders
// ---------------------------------------------------------------------------

/// LINE sender that records every call and always succeeds.
#[derive(Default)]
pub struct StubLine {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl LineSender for StubLine {
    async fn send(&self, transport: &LineTransport, text: &str) -> Result<(), LineError> {
        let target = match transport {
            LineTransport::Push { to } => to.clone(),
            LineTransport::Legacy { .. } => "legacy".to_string(),
        };
        self.calls
            .lock()
            .unwrap()
            .push(format!("{target}: {text}"));
        Ok(())
    }
}

/// Email sender that records recipients and always succeeds.
#[derive(Default)]
pub struct StubEmail {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl EmailSender for StubEmail {
    async fn send(&self, to: &str, _subject: &str, _html: &str) -> Result<(), EmailError> {
        self.calls.lock().unwrap().push(to.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers, using the
/// given database pool and an optional trigger secret.
///
/// Delivery goes through in-memory stubs; nothing leaves the process.
/// This uses the same [`build_app_router`] as `main.rs`, so integration
/// tests exercise the production middleware stack (CORS, request ID,
/// timeout, tracing, panic recovery).
pub fn build_test_app_with_secret(pool: PgPool, cron_secret: Option<&str>) -> Router {
    let config = test_config(cron_secret);
    let notify_config = test_notify_config();

    let dispatcher = Arc::new(Dispatcher::with_senders(
        pool.clone(),
        notify_config.clone(),
        Arc::new(StubLine::default()),
        Arc::new(StubEmail::default()),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        dispatcher,
        default_days_before: notify_config.default_days_before,
    };

    build_app_router(state, &config)
}

/// Build a test app with the trigger endpoint left open.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_secret(pool, None)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT request with a JSON body.
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a profile row and return its id.
pub async fn seed_profile(pool: &PgPool, email: Option<&str>, line_user_id: Option<&str>) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO profiles (display_name, email, line_user_id)
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("Test User")
    .bind(email)
    .bind(line_user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a project row and return its id.
pub async fn seed_project(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO projects (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Insert a deadline row and return its id.
pub async fn seed_deadline(
    pool: &PgPool,
    project_id: i64,
    assignee_id: Option<i64>,
    title: &str,
    due_date: chrono::NaiveDate,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO deadlines (project_id, assignee_id, title, due_date)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(project_id)
    .bind(assignee_id)
    .bind(title)
    .bind(due_date)
    .fetch_one(pool)
    .await
    .unwrap()
}
