use crate::models::DbSwapRequest;
use eyre::Result;
use shiftswap_core::models::swap::{SwapRequest, SwapStatus};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_swaps(pool: &Pool<Postgres>) -> Result<Vec<SwapRequest>> {
    let swaps = sqlx::query_as::<_, DbSwapRequest>(
        r#"
        SELECT id, date, from_employee_code, to_employee_code,
               from_shift, to_shift, status, created_at
        FROM swap_requests
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    swaps.into_iter().map(SwapRequest::try_from).collect()
}

pub async fn get_swap(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<SwapRequest>> {
    tracing::debug!("Getting swap by id: {}", id);

    let swap = sqlx::query_as::<_, DbSwapRequest>(
        r#"
        SELECT id, date, from_employee_code, to_employee_code,
               from_shift, to_shift, status, created_at
        FROM swap_requests
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    swap.map(SwapRequest::try_from).transpose()
}

pub async fn insert_swap(pool: &Pool<Postgres>, swap: &SwapRequest) -> Result<()> {
    tracing::debug!(
        "Creating swap: id={}, date={}, from={}, to={}, status={}",
        swap.id,
        swap.date,
        swap.from_employee_code,
        swap.to_employee_code,
        swap.status
    );

    sqlx::query(
        r#"
        INSERT INTO swap_requests (
            id, date, from_employee_code, to_employee_code,
            from_shift, to_shift, status, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(swap.id)
    .bind(swap.date.as_str())
    .bind(&swap.from_employee_code)
    .bind(&swap.to_employee_code)
    .bind(&swap.from_shift)
    .bind(&swap.to_shift)
    .bind(swap.status.as_str())
    .bind(swap.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Conditional status change; `None` when the row is gone or has moved on.
pub async fn update_swap_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    expected: SwapStatus,
    next: SwapStatus,
) -> Result<Option<SwapRequest>> {
    let swap = sqlx::query_as::<_, DbSwapRequest>(
        r#"
        UPDATE swap_requests
        SET status = $3
        WHERE id = $1 AND status = $2
        RETURNING id, date, from_employee_code, to_employee_code,
                  from_shift, to_shift, status, created_at
        "#,
    )
    .bind(id)
    .bind(expected.as_str())
    .bind(next.as_str())
    .fetch_optional(pool)
    .await?;

    if swap.is_none() {
        tracing::debug!("Swap {} was not {}; status left unchanged", id, expected);
    }

    swap.map(SwapRequest::try_from).transpose()
}
