use std::collections::HashSet;

use crate::models::swap::SwapRequest;

/// Keeps one swap per (date, from, to), the first one in `swaps` order.
///
/// History is fetched newest first, so the surviving entry is the most
/// recent request between the same two employees on that date.
pub fn dedup_history(swaps: Vec<SwapRequest>) -> Vec<SwapRequest> {
    let mut seen = HashSet::new();
    swaps
        .into_iter()
        .filter(|swap| {
            seen.insert((
                swap.date.clone(),
                swap.from_employee_code.clone(),
                swap.to_employee_code.clone(),
            ))
        })
        .collect()
}
