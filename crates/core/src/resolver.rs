//! Read-side resolution of the shift actually in effect for a cell.
//!
//! Nothing here touches storage; results are recomputed for every query.

use crate::{
    dates::IsoDate,
    models::swap::{SwapRequest, SwapStatus},
};

/// First accepted swap on `date` that involves `employee_code`.
pub fn accepted_swap_for<'a>(
    employee_code: &str,
    date: &IsoDate,
    swaps: &'a [SwapRequest],
) -> Option<&'a SwapRequest> {
    swaps
        .iter()
        .find(|swap| swap.status == SwapStatus::Accepted && swap.applies_to(employee_code, date))
}

/// Shift code in effect for `employee_code` on `date`.
///
/// The first matching accepted swap wins: the from-side receives the
/// swap's `to_shift`, the to-side its `from_shift`. Without a match the
/// base shift is returned unchanged.
pub fn effective_shift<'a>(
    base_shift: &'a str,
    employee_code: &str,
    date: &IsoDate,
    swaps: &'a [SwapRequest],
) -> &'a str {
    match accepted_swap_for(employee_code, date, swaps) {
        Some(swap) if swap.from_employee_code == employee_code => &swap.to_shift,
        Some(swap) => &swap.from_shift,
        None => base_shift,
    }
}

/// Pending swap that a cell currently showing `current_shift` takes part in.
///
/// Matching also compares the shift code captured on the swap, so a swap
/// proposed against a different shift code no longer shows up.
pub fn pending_swap_for_cell<'a>(
    employee_code: &str,
    date: &IsoDate,
    current_shift: &str,
    swaps: &'a [SwapRequest],
) -> Option<&'a SwapRequest> {
    swaps.iter().find(|swap| {
        swap.status == SwapStatus::Pending
            && swap.date == *date
            && ((swap.from_employee_code == employee_code && swap.from_shift == current_shift)
                || (swap.to_employee_code == employee_code && swap.to_shift == current_shift))
    })
}
