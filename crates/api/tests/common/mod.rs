#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use qverify_api::config::ServerConfig;
use qverify_api::router::build_app_router;
use qverify_api::state::AppState;

/// Reviewer the test config falls back to when no header is sent.
pub const TEST_DEFAULT_REVIEWER: Uuid =
    Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001);

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        default_reviewer_id: TEST_DEFAULT_REVIEWER,
        review_batch_size: 50,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Like [`build_test_app`], but also returns the shared state so tests can
/// inspect what handlers stored in it.
pub fn build_test_app_with_state(pool: PgPool) -> (Router, AppState) {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    (build_app_router(state.clone(), &config), state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    reviewer: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(reviewer) = reviewer {
        builder = builder.header("x-reviewer-id", reviewer);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, uri: &str, reviewer: Uuid) -> Response<Body> {
    send(app, Method::GET, uri, Some(&reviewer.to_string()), None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None, None).await
}

pub async fn post_as(app: Router, uri: &str, reviewer: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(reviewer), None).await
}

pub async fn post_json_as(
    app: Router,
    uri: &str,
    reviewer: Uuid,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(&reviewer.to_string()), Some(body)).await
}

pub async fn delete_as(app: Router, uri: &str, reviewer: Uuid) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(&reviewer.to_string()), None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn seed_question(pool: &PgPool, difficulty: Option<i16>) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO question (specification, difficulty) VALUES ('Find the gradient', $1)
         RETURNING id",
    )
    .bind(difficulty)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_verification(
    pool: &PgPool,
    question_id: Uuid,
    status: &str,
    age_minutes: i32,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO question_verification (question_id, status, created_at)
         VALUES ($1, $2, NOW() - make_interval(mins => $3))
         RETURNING id",
    )
    .bind(question_id)
    .bind(status)
    .bind(age_minutes)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Seed `n` pending verifications, returned newest first.
pub async fn seed_pending_batch(pool: &PgPool, n: i32) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for age in 1..=n {
        let question_id = seed_question(pool, None).await;
        ids.push(seed_verification(pool, question_id, "pending", age).await);
    }
    ids
}

pub async fn is_staging(pool: &PgPool, question_id: Uuid) -> bool {
    sqlx::query_scalar("SELECT is_staging FROM question WHERE id = $1")
        .bind(question_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
