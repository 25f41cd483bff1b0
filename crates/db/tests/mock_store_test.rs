use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;
use shiftswap_core::{
    dates::IsoDate,
    errors::ShiftError,
    models::{
        principal::Principal,
        schedule::ScheduleRow,
        swap::{CreateSwapRequest, GridCell, SwapAction, SwapRequest, SwapStatus},
    },
    services::{schedule, swaps, upload},
};
use shiftswap_db::mock::repositories::MockStore;
use uuid::Uuid;

const WEEK: &str = "2024-05-12";

fn week() -> IsoDate {
    IsoDate::parse(WEEK).unwrap()
}

fn row(employee_code: &str, monday: &str, display_order: i32) -> ScheduleRow {
    let mut shifts: [String; 7] = Default::default();
    shifts[1] = monday.to_string();
    ScheduleRow {
        week_start_date: week(),
        employee_code: employee_code.to_string(),
        shifts,
        display_order,
    }
}

fn pending_swap(id: Uuid) -> SwapRequest {
    SwapRequest {
        id,
        date: IsoDate::parse("2024-05-13").unwrap(),
        from_employee_code: "BO".to_string(),
        to_employee_code: "AA".to_string(),
        from_shift: "8.00".to_string(),
        to_shift: "11.30".to_string(),
        status: SwapStatus::Pending,
        created_at: Utc::now(),
    }
}

fn monday_pair() -> CreateSwapRequest {
    CreateSwapRequest {
        week_start_date: Some(WEEK.to_string()),
        first: GridCell::new("BO", 2),
        second: GridCell::new("AA", 2),
    }
}

#[tokio::test]
async fn test_upload_failure_surfaces_as_database_error() {
    let mut store = MockStore::new();
    store
        .expect_replace_week()
        .withf(|week, rows| week.as_str() == WEEK && rows.len() == 1)
        .times(1)
        .returning(|_, _| Err(eyre::eyre!("connection reset")));

    let document = json!({
        "week_start_date": WEEK,
        "shifts": [{ "employee_code": "BO", "monday_shift": "8.00" }]
    });
    let result = upload::upload_matrix(&store, &Principal::admin("admin-1"), &document).await;

    assert!(matches!(result, Err(ShiftError::Database(_))));
}

#[tokio::test]
async fn test_upload_by_employee_never_reaches_store() {
    let store = MockStore::new();

    let document = json!({ "week_start_date": WEEK, "shifts": [] });
    let result =
        upload::upload_matrix(&store, &Principal::employee("user-bo", "BO"), &document).await;

    assert!(matches!(result, Err(ShiftError::Authorization(_))));
}

#[tokio::test]
async fn test_failed_swap_insert_sends_no_notification() {
    let mut store = MockStore::new();
    store
        .expect_get_week_rows()
        .returning(|_| Ok(vec![row("BO", "8.00", 0), row("AA", "11.30", 1)]));
    store.expect_list_swaps().returning(|| Ok(vec![]));
    store
        .expect_insert_swap()
        .times(1)
        .returning(|_| Err(eyre::eyre!("unique violation")));
    store.expect_insert_notification().never();
    store.expect_principal_for_employee().never();

    let result =
        swaps::create_swap(&store, &Principal::employee("user-bo", "BO"), &monday_pair()).await;

    assert!(matches!(result, Err(ShiftError::Database(_))));
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_accept() {
    let id = Uuid::new_v4();
    let mut store = MockStore::new();
    store
        .expect_get_swap()
        .returning(move |id| Ok(Some(pending_swap(id))));
    store.expect_list_swaps().returning(move || Ok(vec![pending_swap(id)]));
    store
        .expect_update_swap_status()
        .withf(|_, expected, next| {
            *expected == SwapStatus::Pending && *next == SwapStatus::Accepted
        })
        .times(1)
        .returning(|id, _, next| {
            Ok(Some(SwapRequest {
                status: next,
                ..pending_swap(id)
            }))
        });
    store
        .expect_principal_for_employee()
        .returning(|_| Ok(Some("user-bo".to_string())));
    store
        .expect_insert_notification()
        .times(1)
        .returning(|_| Err(eyre::eyre!("disk full")));

    let updated = swaps::respond_to_swap(
        &store,
        &Principal::employee("user-aa", "AA"),
        id,
        SwapAction::Accept,
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.status, SwapStatus::Accepted);
}

#[tokio::test]
async fn test_lost_status_race_is_a_conflict() {
    let id = Uuid::new_v4();
    let mut store = MockStore::new();
    store
        .expect_get_swap()
        .returning(move |id| Ok(Some(pending_swap(id))));
    store
        .expect_update_swap_status()
        .times(1)
        .returning(|_, _, _| Ok(None));
    store.expect_insert_notification().never();

    let result = swaps::respond_to_swap(
        &store,
        &Principal::employee("user-bo", "BO"),
        id,
        SwapAction::Cancel,
    )
    .await;

    assert!(matches!(result, Err(ShiftError::Conflict(_))));
}

#[tokio::test]
async fn test_missing_latest_week_is_not_found() {
    let mut store = MockStore::new();
    store.expect_list_weeks().returning(|| Ok(vec![]));

    let result = schedule::load_week_view(&store, None).await;

    assert!(matches!(result, Err(ShiftError::NotFound(_))));
}
