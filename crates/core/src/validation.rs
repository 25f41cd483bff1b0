//! Admission checks for uploaded shift matrices.
//!
//! The upload document arrives as untyped JSON. [`validate`] is the only
//! way to turn it into a [`ValidatedMatrix`], so nothing downstream ever
//! sees unchecked data.

use std::collections::HashSet;

use serde_json::Value;

use crate::{
    dates::IsoDate,
    errors::MatrixError,
    models::schedule::{DAY_FIELDS, ScheduleRow},
};

/// One row of an accepted upload, still without its display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub employee_code: String,
    pub shifts: [String; 7],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMatrix {
    pub week_start_date: IsoDate,
    /// Rows in the order they appeared in the document.
    pub rows: Vec<MatrixRow>,
}

impl ValidatedMatrix {
    /// Store rows, numbered by their position in the upload.
    pub fn to_schedule_rows(&self) -> Vec<ScheduleRow> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| ScheduleRow {
                week_start_date: self.week_start_date.clone(),
                employee_code: row.employee_code.clone(),
                shifts: row.shifts.clone(),
                display_order: index as i32,
            })
            .collect()
    }
}

/// Checks an upload document, failing on the first broken rule.
///
/// # Errors
///
/// Returns the [`MatrixError`] variant naming the rule that failed:
/// non-object document, missing or malformed `week_start_date`, missing,
/// non-list or empty `shifts`, a row without `employee_code`, a day field
/// that is not a string, or an employee listed twice.
pub fn validate(document: &Value) -> Result<ValidatedMatrix, MatrixError> {
    let object = document.as_object().ok_or(MatrixError::NotAnObject)?;

    let week_start_date = match object.get("week_start_date") {
        None | Some(Value::Null) => return Err(MatrixError::MissingWeekStartDate),
        Some(Value::String(raw)) => {
            IsoDate::parse(raw).ok_or(MatrixError::InvalidWeekStartDate)?
        }
        Some(_) => return Err(MatrixError::InvalidWeekStartDate),
    };

    let shifts = match object.get("shifts") {
        None | Some(Value::Null) => return Err(MatrixError::MissingShifts),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(MatrixError::ShiftsNotAList),
    };
    if shifts.is_empty() {
        return Err(MatrixError::EmptyShifts);
    }

    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(shifts.len());
    for (index, item) in shifts.iter().enumerate() {
        let row = validate_row(index, item)?;
        if !seen.insert(row.employee_code.clone()) {
            return Err(MatrixError::DuplicateEmployeeCode {
                index,
                code: row.employee_code,
            });
        }
        rows.push(row);
    }

    Ok(ValidatedMatrix {
        week_start_date,
        rows,
    })
}

fn validate_row(index: usize, item: &Value) -> Result<MatrixRow, MatrixError> {
    let row = item
        .as_object()
        .ok_or(MatrixError::RowNotAnObject { index })?;

    let employee_code = match row.get("employee_code") {
        Some(Value::String(code)) if !code.is_empty() => code.clone(),
        _ => return Err(MatrixError::MissingEmployeeCode { index }),
    };

    let mut shifts: [String; 7] = Default::default();
    for (slot, field) in shifts.iter_mut().zip(DAY_FIELDS) {
        match row.get(field) {
            None | Some(Value::Null) => {}
            Some(Value::String(code)) => *slot = code.clone(),
            Some(_) => return Err(MatrixError::InvalidDayField { index, field }),
        }
    }

    Ok(MatrixRow {
        employee_code,
        shifts,
    })
}
