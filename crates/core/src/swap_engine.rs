//! Rules of the swap request lifecycle.
//!
//! These functions only decide; persisting the outcome is left to
//! [`crate::services::swaps`]. Every rejection is returned before any
//! record is written.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    dates::IsoDate,
    errors::{ShiftError, ShiftResult},
    models::{
        principal::Principal,
        schedule::IDENTIFIER_COLUMN,
        swap::{GridCell, SwapAction, SwapRequest, SwapStatus},
    },
};

/// Rest day.
pub const REST_DAY: &str = "RI";
/// Day off.
pub const DAY_OFF: &str = "NL";

pub fn is_reserved_code(shift: &str) -> bool {
    let shift = shift.trim();
    shift == REST_DAY || shift == DAY_OFF
}

fn check_same_day(principal: &Principal, first: &GridCell, second: &GridCell) -> ShiftResult<()> {
    if !principal.is_admin() && first.column != second.column {
        return Err(ShiftError::Authorization(
            "Only administrators can swap shifts on different days".to_string(),
        ));
    }
    Ok(())
}

fn check_column(principal: &Principal, cell: &GridCell) -> ShiftResult<()> {
    if cell.column == IDENTIFIER_COLUMN {
        if principal.is_admin() {
            return Err(ShiftError::Validation(
                "The employee code column holds no shift".to_string(),
            ));
        }
        return Err(ShiftError::Authorization(
            "The employee code column cannot be swapped".to_string(),
        ));
    }
    if cell.column > 7 {
        return Err(ShiftError::Validation(format!(
            "Column {} is outside the week",
            cell.column
        )));
    }
    Ok(())
}

fn check_first_cell_owner(principal: &Principal, cell: &GridCell) -> ShiftResult<()> {
    if principal.is_admin() || principal.is_employee(&cell.employee_code) {
        Ok(())
    } else {
        Err(ShiftError::Authorization(
            "You can only start a swap from one of your own shifts".to_string(),
        ))
    }
}

/// Grid-level checks for a pair of cells, before any shift is looked up.
pub fn check_pair(principal: &Principal, first: &GridCell, second: &GridCell) -> ShiftResult<()> {
    check_column(principal, first)?;
    check_column(principal, second)?;
    check_first_cell_owner(principal, first)?;
    if first == second {
        return Err(ShiftError::Validation(
            "A shift cannot be swapped with itself".to_string(),
        ));
    }
    check_same_day(principal, first, second)
}

/// A grid cell with its date and the shift currently in effect there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCell {
    pub cell: GridCell,
    pub date: IsoDate,
    pub effective_shift: String,
}

/// Builds the swap record for a selected pair of cells.
///
/// Admin swaps are accepted immediately and may span two dates; the record
/// is then anchored to the first cell's date. Employee swaps stay pending
/// and must pair two non-rest shifts on the same day.
pub fn plan_swap(
    principal: &Principal,
    first: &ResolvedCell,
    second: &ResolvedCell,
) -> ShiftResult<SwapRequest> {
    check_pair(principal, &first.cell, &second.cell)?;

    if !principal.is_admin()
        && (is_reserved_code(&first.effective_shift) || is_reserved_code(&second.effective_shift))
    {
        return Err(ShiftError::Authorization(format!(
            "Shifts marked {REST_DAY} or {DAY_OFF} cannot be swapped"
        )));
    }

    let status = if principal.is_admin() {
        SwapStatus::Accepted
    } else {
        SwapStatus::Pending
    };

    Ok(SwapRequest {
        id: Uuid::new_v4(),
        date: first.date.clone(),
        from_employee_code: first.cell.employee_code.clone(),
        to_employee_code: second.cell.employee_code.clone(),
        from_shift: first.effective_shift.clone(),
        to_shift: second.effective_shift.clone(),
        status,
        created_at: Utc::now(),
    })
}

/// Checks that `principal` may apply `action` to `swap`.
pub fn authorize_transition(
    principal: &Principal,
    swap: &SwapRequest,
    action: SwapAction,
) -> ShiftResult<()> {
    if swap.status.is_terminal() {
        return Err(ShiftError::Conflict(format!(
            "Swap {} is already {}",
            swap.id, swap.status
        )));
    }
    if principal.is_admin() {
        return Ok(());
    }

    let allowed = match action {
        SwapAction::Accept | SwapAction::Reject => principal.is_employee(&swap.to_employee_code),
        SwapAction::Cancel => principal.is_employee(&swap.from_employee_code),
    };
    if allowed {
        Ok(())
    } else {
        let party = match action {
            SwapAction::Accept | SwapAction::Reject => "the requested employee",
            SwapAction::Cancel => "the requesting employee",
        };
        Err(ShiftError::Authorization(format!(
            "Only {party} or an administrator can {action} this swap"
        )))
    }
}

/// Rejects `candidate` if it would become a second accepted swap for one
/// of its cells.
pub fn ensure_no_accepted_overlap(
    candidate: &SwapRequest,
    existing: &[SwapRequest],
) -> ShiftResult<()> {
    let overlapping = existing.iter().find(|swap| {
        swap.id != candidate.id
            && swap.status == SwapStatus::Accepted
            && swap.date == candidate.date
            && (swap.involves(&candidate.from_employee_code)
                || swap.involves(&candidate.to_employee_code))
    });

    match overlapping {
        Some(swap) => Err(ShiftError::Conflict(format!(
            "An accepted swap between {} and {} already applies on {}",
            swap.from_employee_code, swap.to_employee_code, swap.date
        ))),
        None => Ok(()),
    }
}

/// Rejects a pending request identical to one that is still open.
pub fn ensure_not_duplicate_pending(
    candidate: &SwapRequest,
    existing: &[SwapRequest],
) -> ShiftResult<()> {
    let duplicate = existing.iter().any(|swap| {
        swap.status == SwapStatus::Pending
            && swap.date == candidate.date
            && swap.from_employee_code == candidate.from_employee_code
            && swap.to_employee_code == candidate.to_employee_code
    });

    if duplicate {
        Err(ShiftError::Conflict(
            "An identical swap request is already pending".to_string(),
        ))
    } else {
        Ok(())
    }
}
