//! Tests for `AppError` to HTTP response mapping. No server or database is
//! involved; errors are rendered through `IntoResponse` directly.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use staffing_api::error::AppError;
use staffing_core::error::CoreError;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn not_found_returns_404() {
    let (status, json) = render(CoreError::not_found("Assignment", "3/7").into()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Assignment with key 3/7 not found");
}

#[tokio::test]
async fn validation_returns_400() {
    let (status, json) = render(
        CoreError::Validation("Weekly hours must be between 1 and 40".into()).into(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Weekly hours must be between 1 and 40");
}

#[tokio::test]
async fn conflict_and_concurrency_are_both_409_with_distinct_codes() {
    let (status, json) = render(CoreError::Conflict("taken".into()).into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");

    let (status, json) = render(CoreError::Concurrency("stale".into()).into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONCURRENCY_CONFLICT");
}

#[tokio::test]
async fn bad_request_uses_validation_code() {
    let (status, json) = render(AppError::BadRequest("expected a number".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let (status, json) = render(
        CoreError::Internal("pool exhausted at 10.0.0.4".into()).into(),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, _) = render(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pool_timeout_returns_500() {
    let (status, json) = render(AppError::Database(sqlx::Error::PoolTimedOut)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unique_index_violation_returns_409(pool: sqlx::PgPool) {
    let insert = "INSERT INTO projects (name, start_date, status) \
                  VALUES ('Dup', '2024-01-01', 'planned')";
    sqlx::query(insert).execute(&pool).await.unwrap();
    let err = sqlx::query(insert).execute(&pool).await.unwrap_err();

    let (status, json) = render(err.into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("uq_projects_name_active"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn other_integrity_violation_returns_store_rejected(pool: sqlx::PgPool) {
    let err = sqlx::query(
        "INSERT INTO projects (name, start_date, status) VALUES ('Bad', '2024-01-01', 'archived')",
    )
    .execute(&pool)
    .await
    .unwrap_err();

    let (status, json) = render(err.into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "STORE_REJECTED");
}
