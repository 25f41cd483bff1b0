//! Assembly of the schedule grid shown to viewers.

use crate::{
    dates::IsoDate,
    errors::ShiftResult,
    models::{
        schedule::{DAY_LABELS, DayHeader, ScheduleRow, WeekView, WeekViewCell, WeekViewRow},
        swap::SwapRequest,
    },
    resolver::{accepted_swap_for, effective_shift, pending_swap_for_cell},
};

pub fn day_headers(week_start: &IsoDate) -> ShiftResult<Vec<DayHeader>> {
    DAY_LABELS
        .iter()
        .enumerate()
        .map(|(offset, label)| {
            let date = week_start.plus_days(offset)?;
            Ok(DayHeader {
                column: offset + 1,
                label: (*label).to_string(),
                display_date: date.to_display(),
                date,
            })
        })
        .collect()
}

/// Layers the resolver over every cell of the stored week.
///
/// Rows come out in `display_order`; swaps are consulted in the order given.
pub fn build_week_view(
    week_start: &IsoDate,
    rows: &[ScheduleRow],
    swaps: &[SwapRequest],
) -> ShiftResult<WeekView> {
    let days = day_headers(week_start)?;

    let mut ordered: Vec<&ScheduleRow> = rows.iter().collect();
    ordered.sort_by_key(|row| row.display_order);

    let rows = ordered
        .into_iter()
        .map(|row| WeekViewRow {
            employee_code: row.employee_code.clone(),
            display_order: row.display_order,
            cells: days
                .iter()
                .zip(row.shifts.iter())
                .map(|(day, base)| {
                    let effective = effective_shift(base, &row.employee_code, &day.date, swaps);
                    WeekViewCell {
                        column: day.column,
                        date: day.date.clone(),
                        base_shift: base.clone(),
                        effective_shift: effective.to_string(),
                        swapped: accepted_swap_for(&row.employee_code, &day.date, swaps)
                            .is_some(),
                        pending_swap_id: pending_swap_for_cell(
                            &row.employee_code,
                            &day.date,
                            effective,
                            swaps,
                        )
                        .map(|swap| swap.id),
                    }
                })
                .collect(),
        })
        .collect();

    Ok(WeekView {
        week_start_date: week_start.clone(),
        days,
        rows,
    })
}
