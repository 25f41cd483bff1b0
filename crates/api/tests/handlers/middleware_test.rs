use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use shiftswap_api::middleware::error_handling::{AppError, GENERIC_FAILURE_MESSAGE};
use shiftswap_core::errors::ShiftError;

use crate::test_utils::{TestContext, WEEK, as_admin, as_employee};

#[tokio::test]
async fn test_health_needs_no_principal() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["latest_week"], Value::Null);
}

#[tokio::test]
async fn test_health_reports_latest_uploaded_week() {
    let ctx = TestContext::with_week().await;

    let body = ctx.server.get("/health").await.json::<Value>();

    assert_eq!(body["latest_week"], WEEK);
}

#[tokio::test]
async fn test_version_names_the_service() {
    let ctx = TestContext::new().await;

    let body = ctx.server.get("/version").await.json::<Value>();

    assert_eq!(body["name"], "shiftswap-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[test_log::test(tokio::test)]
async fn test_missing_principal_header_is_unauthorized() {
    let ctx = TestContext::with_week().await;

    let response = ctx.server.get("/api/schedule").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_employee_without_code_is_unauthorized() {
    let ctx = TestContext::with_week().await;

    let response = ctx
        .server
        .get("/api/schedule")
        .add_header(
            axum::http::HeaderName::from_static("x-principal-id"),
            axum::http::HeaderValue::from_static("user-bo"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_needs_no_employee_code() {
    let ctx = TestContext::with_week().await;

    let response = as_admin(ctx.server.get("/api/schedule")).await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_unknown_principal_is_an_ordinary_user() {
    let ctx = TestContext::new().await;

    let response = as_employee(ctx.server.post("/api/schedule/upload"), "stranger", "ZZ")
        .json(&crate::test_utils::week_document("2024-05-12"))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_internal_errors_hide_details() {
    use axum::response::IntoResponse;

    let response =
        AppError(ShiftError::Database(eyre::eyre!("password=hunter2 rejected"))).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_conflict_maps_to_409() {
    use axum::response::IntoResponse;

    let response = AppError(ShiftError::Conflict("already accepted".into())).into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}
