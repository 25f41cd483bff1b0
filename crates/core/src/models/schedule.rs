use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::IsoDate;

/// Upload document field names, Sunday first.
pub const DAY_FIELDS: [&str; 7] = [
    "sunday_shift",
    "monday_shift",
    "tuesday_shift",
    "wednesday_shift",
    "thursday_shift",
    "friday_shift",
    "saturday_shift",
];

pub const DAY_LABELS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Grid column holding the employee code; day columns follow it.
pub const IDENTIFIER_COLUMN: usize = 0;

/// One employee's assignments for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub week_start_date: IsoDate,
    pub employee_code: String,
    /// Sunday..Saturday; an empty string means no shift.
    pub shifts: [String; 7],
    pub display_order: i32,
}

impl ScheduleRow {
    /// Shift held in a grid column (1 = Sunday .. 7 = Saturday).
    pub fn shift_for_column(&self, column: usize) -> Option<&str> {
        column
            .checked_sub(1)
            .and_then(|day| self.shifts.get(day))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadScheduleResponse {
    pub week_start_date: IsoDate,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveShiftResponse {
    pub employee_code: String,
    pub date: IsoDate,
    pub base_shift: String,
    pub effective_shift: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHeader {
    pub column: usize,
    pub label: String,
    pub date: IsoDate,
    pub display_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekViewCell {
    pub column: usize,
    pub date: IsoDate,
    pub base_shift: String,
    pub effective_shift: String,
    pub swapped: bool,
    pub pending_swap_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekViewRow {
    pub employee_code: String,
    pub display_order: i32,
    pub cells: Vec<WeekViewCell>,
}

/// The schedule grid as a viewer sees it, swaps already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekView {
    pub week_start_date: IsoDate,
    pub days: Vec<DayHeader>,
    pub rows: Vec<WeekViewRow>,
}
