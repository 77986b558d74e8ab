#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use staffing_api::config::ServerConfig;
use staffing_api::router::build_app_router;
use staffing_api::state::AppState;

/// A `ServerConfig` for tests. The pool is handed in directly, so the
/// database URL is never used.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:4200".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        database_max_connections: 5,
    }
}

/// Build the production router on top of the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Send a raw string body with a JSON content type, for malformed payloads.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn project_body(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "client": "Acme",
        "status": "planned",
        "startDate": "2024-01-01",
    })
}

pub fn developer_body(name: &str, email: &str) -> Value {
    serde_json::json!({
        "fullName": name,
        "email": email,
        "seniority": "SR",
    })
}

pub async fn create_project(pool: &PgPool, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/Projects",
        project_body(name),
    )
    .await;
    assert_eq!(response.status(), 201, "project fixture");
    body_json(response).await["projectId"].as_i64().unwrap()
}

pub async fn create_developer(pool: &PgPool, name: &str, email: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/Developers",
        developer_body(name, email),
    )
    .await;
    assert_eq!(response.status(), 201, "developer fixture");
    body_json(response).await["developerId"].as_i64().unwrap()
}

pub async fn create_assignment(
    pool: &PgPool,
    project_id: i64,
    developer_id: i64,
    hours: i64,
) -> Response<Body> {
    post_json(
        build_test_app(pool.clone()),
        "/api/Assignments",
        serde_json::json!({
            "projectId": project_id,
            "developerId": developer_id,
            "role": "Dev",
            "weeklyHours": hours,
            "assignmentDate": "2024-01-02",
        }),
    )
    .await
}
