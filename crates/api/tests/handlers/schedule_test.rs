use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use shiftswap_core::{
    models::schedule::{EffectiveShiftResponse, UploadScheduleResponse, WeekView},
    store::ShiftStore,
};

use crate::test_utils::{TestContext, WEEK, as_admin, as_employee, week_document};

#[tokio::test]
async fn test_upload_returns_week_and_row_count() {
    let ctx = TestContext::new().await;

    let response = as_admin(ctx.server.post("/api/schedule/upload"))
        .json(&week_document(WEEK))
        .await;

    response.assert_status_ok();
    let body: UploadScheduleResponse = response.json();
    assert_eq!(body.week_start_date.as_str(), WEEK);
    assert_eq!(body.rows, 3);
}

#[tokio::test]
async fn test_employee_cannot_upload() {
    let ctx = TestContext::new().await;

    let response = as_employee(ctx.server.post("/api/schedule/upload"), "user-bo", "BO")
        .json(&week_document(WEEK))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert!(ctx.store.list_weeks().await.unwrap().is_empty());
}

#[rstest]
#[case::not_an_object(json!([1, 2]), "Document must be a JSON object")]
#[case::bad_week(json!({ "week_start_date": "12/05/2024", "shifts": [{ "employee_code": "BO" }] }), "YYYY-MM-DD")]
#[case::empty_shifts(json!({ "week_start_date": WEEK, "shifts": [] }), "at least one row")]
#[case::blank_code(json!({ "week_start_date": WEEK, "shifts": [{ "employee_code": "" }] }), "Row 0")]
#[case::numeric_day(json!({ "week_start_date": WEEK, "shifts": [{ "employee_code": "BO", "monday_shift": 8 }] }), "monday_shift")]
#[tokio::test]
async fn test_invalid_upload_is_bad_request(#[case] document: Value, #[case] fragment: &str) {
    let ctx = TestContext::with_week().await;

    let response = as_admin(ctx.server.post("/api/schedule/upload"))
        .json(&document)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap_or_default();
    assert!(message.contains(fragment), "unexpected message: {message}");

    // The stored week is untouched
    let view: WeekView = as_admin(ctx.server.get("/api/schedule")).await.json();
    assert_eq!(view.rows.len(), 3);
}

#[tokio::test]
async fn test_week_view_defaults_to_latest_upload() {
    let ctx = TestContext::with_week().await;
    as_admin(ctx.server.post("/api/schedule/upload"))
        .json(&week_document("2024-05-19"))
        .await
        .assert_status_ok();

    let latest: WeekView = as_employee(ctx.server.get("/api/schedule"), "user-bo", "BO")
        .await
        .json();
    let earlier: WeekView = as_employee(ctx.server.get("/api/schedule"), "user-bo", "BO")
        .add_query_param("week_start_date", WEEK)
        .await
        .json();

    assert_eq!(latest.week_start_date.as_str(), "2024-05-19");
    assert_eq!(earlier.week_start_date.as_str(), WEEK);
    assert_eq!(earlier.days[1].display_date, "13/05/2024");

    let codes: Vec<&str> = earlier
        .rows
        .iter()
        .map(|row| row.employee_code.as_str())
        .collect();
    assert_eq!(codes, vec!["BO", "AA", "CA"]);
    assert_eq!(earlier.rows[0].cells[1].base_shift, "8.00");
}

#[tokio::test]
async fn test_week_view_before_any_upload_is_not_found() {
    let ctx = TestContext::new().await;

    let response = as_admin(ctx.server.get("/api/schedule")).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("13/05/2024")]
#[case("2024-05-13")]
#[tokio::test]
async fn test_effective_shift_accepts_both_date_formats(#[case] date: &str) {
    let ctx = TestContext::with_week().await;

    let response = as_employee(ctx.server.get("/api/schedule/effective"), "user-aa", "AA")
        .add_query_param("employee_code", "AA")
        .add_query_param("date", date)
        .await;

    response.assert_status_ok();
    let body: EffectiveShiftResponse = response.json();
    assert_eq!(body.base_shift, "11.30");
    assert_eq!(body.effective_shift, "11.30");
}

#[tokio::test]
async fn test_effective_shift_outside_uploaded_weeks_is_not_found() {
    let ctx = TestContext::with_week().await;

    let response = as_admin(ctx.server.get("/api/schedule/effective"))
        .add_query_param("employee_code", "AA")
        .add_query_param("date", "2024-06-01")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_effective_shift_with_garbled_date_is_bad_request() {
    let ctx = TestContext::with_week().await;

    let response = as_admin(ctx.server.get("/api/schedule/effective"))
        .add_query_param("employee_code", "AA")
        .add_query_param("date", "next monday")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_long_shift_codes_upload_and_resolve() {
    let ctx = TestContext::new().await;
    let shift = "05.55+ split with training block until 14.30";
    let document = json!({
        "week_start_date": WEEK,
        "shifts": [{ "employee_code": "NIGHT-SUPERVISOR-EAST-WAREHOUSE", "monday_shift": shift }]
    });

    as_admin(ctx.server.post("/api/schedule/upload"))
        .json(&document)
        .await
        .assert_status_ok();

    let body: EffectiveShiftResponse = as_admin(ctx.server.get("/api/schedule/effective"))
        .add_query_param("employee_code", "NIGHT-SUPERVISOR-EAST-WAREHOUSE")
        .add_query_param("date", "13/05/2024")
        .await
        .json();
    assert_eq!(body.effective_shift, shift);
}
