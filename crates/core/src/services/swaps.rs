use tracing::{debug, info};
use uuid::Uuid;

use super::{
    notifications::notify_employee,
    schedule::{resolve_week, week_rows},
};
use crate::{
    dates::{IsoDate, normalize_date},
    errors::{ShiftError, ShiftResult},
    history::dedup_history,
    models::{
        notification::NotificationKind,
        principal::Principal,
        schedule::ScheduleRow,
        swap::{CreateSwapRequest, GridCell, SwapAction, SwapRequest, SwapStatus},
    },
    resolver::effective_shift,
    store::ShiftStore,
    swap_engine::{
        ResolvedCell, authorize_transition, check_pair, ensure_no_accepted_overlap,
        ensure_not_duplicate_pending, plan_swap,
    },
};

fn resolve_cell(
    week: &IsoDate,
    rows: &[ScheduleRow],
    swaps: &[SwapRequest],
    cell: &GridCell,
) -> ShiftResult<ResolvedCell> {
    let row = rows
        .iter()
        .find(|row| row.employee_code == cell.employee_code)
        .ok_or_else(|| {
            ShiftError::NotFound(format!(
                "Employee {} is not on the schedule for week starting {week}",
                cell.employee_code
            ))
        })?;
    let base = row.shift_for_column(cell.column).ok_or_else(|| {
        ShiftError::Validation(format!("Column {} holds no shift", cell.column))
    })?;
    let date = week.plus_days(cell.column - 1)?;
    let effective = effective_shift(base, &cell.employee_code, &date, swaps).to_string();

    Ok(ResolvedCell {
        cell: cell.clone(),
        date,
        effective_shift: effective,
    })
}

/// Creates a swap between two selected grid cells.
///
/// Both shifts are captured as currently in effect. Admin swaps are stored
/// as accepted; employee swaps as pending for the counterpart to answer.
/// Selecting the same cell twice clears the selection and yields `None`.
pub async fn create_swap(
    store: &dyn ShiftStore,
    principal: &Principal,
    request: &CreateSwapRequest,
) -> ShiftResult<Option<SwapRequest>> {
    if request.first == request.second {
        debug!(principal_id = %principal.id, cell = ?request.first, "Same cell selected twice; selection cleared");
        return Ok(None);
    }
    check_pair(principal, &request.first, &request.second)?;

    let week = resolve_week(store, request.week_start_date.as_deref()).await?;
    let rows = week_rows(store, &week).await?;
    let swaps = store.list_swaps().await.map_err(ShiftError::Database)?;

    let first = resolve_cell(&week, &rows, &swaps, &request.first)?;
    let second = resolve_cell(&week, &rows, &swaps, &request.second)?;
    let swap = plan_swap(principal, &first, &second)?;

    // A pending request on an already swapped cell could never be accepted
    ensure_no_accepted_overlap(&swap, &swaps)?;
    if swap.status == SwapStatus::Pending {
        ensure_not_duplicate_pending(&swap, &swaps)?;
    }

    store
        .insert_swap(&swap)
        .await
        .map_err(ShiftError::Database)?;

    info!(
        swap_id = %swap.id,
        date = %swap.date,
        from = %swap.from_employee_code,
        to = %swap.to_employee_code,
        status = %swap.status,
        "Swap created"
    );

    let display_date = swap.date.to_display();
    if swap.status == SwapStatus::Accepted {
        for (employee, shift) in [
            (&swap.from_employee_code, &swap.to_shift),
            (&swap.to_employee_code, &swap.from_shift),
        ] {
            notify_employee(
                store,
                employee,
                NotificationKind::SwapApplied,
                format!("An administrator changed your shift on {display_date} to {shift}"),
                swap.id,
            )
            .await;
        }
    } else {
        notify_employee(
            store,
            &swap.to_employee_code,
            NotificationKind::SwapRequested,
            format!(
                "{} asks to swap their {} for your {} on {display_date}",
                swap.from_employee_code, swap.from_shift, swap.to_shift
            ),
            swap.id,
        )
        .await;
    }

    Ok(Some(swap))
}

/// Accepts, rejects or cancels a pending swap.
///
/// A swap id that no longer exists is ignored and yields `None`. A swap
/// that is already terminal, or that changes state while this runs, is
/// reported as a conflict.
pub async fn respond_to_swap(
    store: &dyn ShiftStore,
    principal: &Principal,
    id: Uuid,
    action: SwapAction,
) -> ShiftResult<Option<SwapRequest>> {
    let Some(swap) = store.get_swap(id).await.map_err(ShiftError::Database)? else {
        debug!(swap_id = %id, %action, "Swap not found; nothing to do");
        return Ok(None);
    };

    authorize_transition(principal, &swap, action)?;

    let next = action.target_status();
    if next == SwapStatus::Accepted {
        let swaps = store.list_swaps().await.map_err(ShiftError::Database)?;
        let candidate = SwapRequest {
            status: next,
            ..swap.clone()
        };
        ensure_no_accepted_overlap(&candidate, &swaps)?;
    }

    let updated = store
        .update_swap_status(id, SwapStatus::Pending, next)
        .await
        .map_err(ShiftError::Database)?
        .ok_or_else(|| ShiftError::Conflict(format!("Swap {id} is no longer pending")))?;

    info!(swap_id = %id, %action, by = %principal.id, "Swap {}", updated.status);

    let display_date = updated.date.to_display();
    // The acting side is told nothing; the other party hears about it
    let actor = match action {
        SwapAction::Accept | SwapAction::Reject => &updated.to_employee_code,
        SwapAction::Cancel => &updated.from_employee_code,
    };
    let recipient = updated.counterpart_of(actor);
    let (kind, message) = match action {
        SwapAction::Accept => (
            NotificationKind::SwapAccepted,
            format!("Your swap with {actor} on {display_date} was accepted"),
        ),
        SwapAction::Reject => (
            NotificationKind::SwapRejected,
            format!("Your swap with {actor} on {display_date} was rejected"),
        ),
        SwapAction::Cancel => (
            NotificationKind::SwapCancelled,
            format!("{actor} cancelled the swap request for {display_date}"),
        ),
    };
    notify_employee(store, recipient, kind, message, updated.id).await;

    Ok(Some(updated))
}

/// Swap history, newest first, one entry per (date, from, to).
///
/// With `week` given, only swaps dated inside that week are returned.
pub async fn swap_history(
    store: &dyn ShiftStore,
    week: Option<&str>,
) -> ShiftResult<Vec<SwapRequest>> {
    let swaps = store.list_swaps().await.map_err(ShiftError::Database)?;

    let swaps = match week {
        Some(raw) => {
            let week = normalize_date(raw)?;
            week.to_naive()?;
            swaps
                .into_iter()
                .filter(|swap| swap.date.is_within_week(&week).unwrap_or(false))
                .collect()
        }
        None => swaps,
    };

    Ok(dedup_history(swaps))
}
