use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use shiftswap_core::{
    models::{
        notification::{NotificationKind, NotificationListResponse},
        schedule::{EffectiveShiftResponse, WeekView},
        swap::{SwapHistoryResponse, SwapRequest, SwapResponse, SwapStatus},
    },
    refresh::RefreshTrigger,
};
use shiftswap_api::events::SwapEvent;
use uuid::Uuid;

use crate::test_utils::{MONDAY, TUESDAY, TestContext, WEEK, as_admin, as_employee, swap_body};

async fn request_as_bo(ctx: &TestContext) -> SwapRequest {
    let response = as_employee(ctx.server.post("/api/swaps"), "user-bo", "BO")
        .json(&swap_body(("BO", MONDAY), ("AA", MONDAY)))
        .await;
    response.assert_status_ok();
    response
        .json::<SwapResponse>()
        .swap
        .expect("created swap")
}

#[tokio::test]
async fn test_admin_swap_applies_immediately() {
    let ctx = TestContext::with_week().await;

    let response = as_admin(ctx.server.post("/api/swaps"))
        .json(&swap_body(("BO", MONDAY), ("AA", MONDAY)))
        .await;

    response.assert_status_ok();
    let swap = response.json::<SwapResponse>().swap.unwrap();
    assert_eq!(swap.status, SwapStatus::Accepted);
    assert_eq!(swap.from_shift, "8.00");
    assert_eq!(swap.to_shift, "11.30");

    let view: WeekView = as_admin(ctx.server.get("/api/schedule"))
        .add_query_param("week_start_date", WEEK)
        .await
        .json();
    let monday = |row: usize| view.rows[row].cells[MONDAY - 1].clone();
    assert_eq!(monday(0).effective_shift, "11.30");
    assert_eq!(monday(1).effective_shift, "8.00");
    assert!(monday(0).swapped);
    assert_eq!(monday(2).effective_shift, "NL");

    for (employee, expected) in [("BO", "11.30"), ("AA", "8.00")] {
        let lookup: EffectiveShiftResponse = as_admin(ctx.server.get("/api/schedule/effective"))
            .add_query_param("employee_code", employee)
            .add_query_param("date", "13/05/2024")
            .await
            .json();
        assert_eq!(lookup.effective_shift, expected);
    }

    let inbox: NotificationListResponse =
        as_employee(ctx.server.get("/api/notifications"), "user-aa", "AA")
            .await
            .json();
    assert_eq!(inbox.notifications.len(), 1);
    assert_eq!(inbox.notifications[0].kind, NotificationKind::SwapApplied);
}

#[tokio::test]
async fn test_pending_swap_lifecycle() {
    let ctx = TestContext::with_week().await;
    let swap = request_as_bo(&ctx).await;
    assert_eq!(swap.status, SwapStatus::Pending);

    // The pending request does not change anyone's shift yet
    let view: WeekView = as_admin(ctx.server.get("/api/schedule")).await.json();
    assert_eq!(view.rows[0].cells[MONDAY - 1].effective_shift, "8.00");
    assert_eq!(view.rows[0].cells[MONDAY - 1].pending_swap_id, Some(swap.id));

    // Only the counterpart may answer
    let response = as_employee(
        ctx.server.post(&format!("/api/swaps/{}/accept", swap.id)),
        "user-bo",
        "BO",
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = as_employee(
        ctx.server.post(&format!("/api/swaps/{}/accept", swap.id)),
        "user-aa",
        "AA",
    )
    .await;
    response.assert_status_ok();
    let accepted = response.json::<SwapResponse>().swap.unwrap();
    assert_eq!(accepted.status, SwapStatus::Accepted);

    let view: WeekView = as_admin(ctx.server.get("/api/schedule")).await.json();
    assert_eq!(view.rows[0].cells[MONDAY - 1].effective_shift, "11.30");
    assert_eq!(view.rows[1].cells[MONDAY - 1].effective_shift, "8.00");

    // Terminal swaps cannot move again
    let response = as_employee(
        ctx.server.post(&format!("/api/swaps/{}/cancel", swap.id)),
        "user-bo",
        "BO",
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let inbox: NotificationListResponse =
        as_employee(ctx.server.get("/api/notifications"), "user-bo", "BO")
            .await
            .json();
    assert_eq!(inbox.notifications[0].kind, NotificationKind::SwapAccepted);
}

#[tokio::test]
async fn test_requester_can_cancel() {
    let ctx = TestContext::with_week().await;
    let swap = request_as_bo(&ctx).await;

    let response = as_employee(
        ctx.server.post(&format!("/api/swaps/{}/cancel", swap.id)),
        "user-bo",
        "BO",
    )
    .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<SwapResponse>().swap.unwrap().status,
        SwapStatus::Cancelled
    );
}

#[tokio::test]
async fn test_unrelated_employee_cannot_reject() {
    let ctx = TestContext::with_week().await;
    let swap = request_as_bo(&ctx).await;

    let response = as_employee(
        ctx.server.post(&format!("/api/swaps/{}/reject", swap.id)),
        "user-ca",
        "CA",
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_responding_to_missing_swap_returns_null() {
    let ctx = TestContext::with_week().await;

    let response = as_admin(
        ctx.server
            .post(&format!("/api/swaps/{}/accept", Uuid::new_v4())),
    )
    .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["swap"], Value::Null);
}

#[tokio::test]
async fn test_employee_cannot_swap_across_dates() {
    let ctx = TestContext::with_week().await;

    let response = as_employee(ctx.server.post("/api/swaps"), "user-aa", "AA")
        .json(&swap_body(("AA", TUESDAY), ("BO", MONDAY)))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_employee_must_start_from_own_cell() {
    let ctx = TestContext::with_week().await;

    let response = as_employee(ctx.server.post("/api/swaps"), "user-ca", "CA")
        .json(&swap_body(("BO", MONDAY), ("AA", MONDAY)))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_employee_cannot_swap_rest_day() {
    let ctx = TestContext::with_week().await;

    let response = as_employee(ctx.server.post("/api/swaps"), "user-bo", "BO")
        .json(&swap_body(("BO", TUESDAY), ("AA", TUESDAY)))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_history_is_deduplicated_and_filtered_by_week() {
    let ctx = TestContext::with_week().await;
    let first = request_as_bo(&ctx).await;
    as_employee(
        ctx.server.post(&format!("/api/swaps/{}/cancel", first.id)),
        "user-bo",
        "BO",
    )
    .await
    .assert_status_ok();
    let second = request_as_bo(&ctx).await;

    let history: SwapHistoryResponse = as_admin(ctx.server.get("/api/swaps"))
        .add_query_param("week_start_date", WEEK)
        .await
        .json();
    assert_eq!(history.swaps.len(), 1);
    assert_eq!(history.swaps[0].id, second.id);

    let other_week: SwapHistoryResponse = as_admin(ctx.server.get("/api/swaps"))
        .add_query_param("week_start_date", "2024-05-19")
        .await
        .json();
    assert!(other_week.swaps.is_empty());
}

#[tokio::test]
async fn test_upload_clears_swaps_and_notifications() {
    let ctx = TestContext::with_week().await;
    request_as_bo(&ctx).await;
    assert_eq!(ctx.store.notification_count().await, 1);

    as_admin(ctx.server.post("/api/schedule/upload"))
        .json(&crate::test_utils::week_document("2024-05-19"))
        .await
        .assert_status_ok();

    let history: SwapHistoryResponse = as_admin(ctx.server.get("/api/swaps")).await.json();
    assert!(history.swaps.is_empty());
    assert_eq!(ctx.store.notification_count().await, 0);
}

#[tokio::test]
async fn test_mutations_publish_refresh() {
    let ctx = TestContext::with_week().await;
    let mut rx = ctx.state.events.subscribe();

    request_as_bo(&ctx).await;

    match rx.recv().await.unwrap() {
        SwapEvent::Refresh { trigger, .. } => assert_eq!(trigger, RefreshTrigger::Mutation),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn test_same_cell_twice_creates_nothing() {
    let ctx = TestContext::with_week().await;
    let mut rx = ctx.state.events.subscribe();

    let response = as_employee(ctx.server.post("/api/swaps"), "user-bo", "BO")
        .json(&swap_body(("BO", MONDAY), ("BO", MONDAY)))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["swap"], Value::Null);
    assert!(rx.try_recv().is_err());

    let history: SwapHistoryResponse = as_admin(ctx.server.get("/api/swaps")).await.json();
    assert!(history.swaps.is_empty());
}
