use crate::{
    dates::{IsoDate, normalize_date},
    errors::{ShiftError, ShiftResult},
    models::schedule::{EffectiveShiftResponse, ScheduleRow, WeekView},
    resolver::effective_shift,
    store::ShiftStore,
    view::build_week_view,
};

/// Picks the week a request refers to: the given one, else the latest upload.
pub async fn resolve_week(store: &dyn ShiftStore, requested: Option<&str>) -> ShiftResult<IsoDate> {
    if let Some(raw) = requested {
        return normalize_date(raw);
    }

    store
        .list_weeks()
        .await
        .map_err(ShiftError::Database)?
        .into_iter()
        .next()
        .ok_or_else(|| ShiftError::NotFound("No schedule has been uploaded yet".to_string()))
}

/// Stored rows of `week`; an unknown week is reported as not found.
pub async fn week_rows(store: &dyn ShiftStore, week: &IsoDate) -> ShiftResult<Vec<ScheduleRow>> {
    let rows = store
        .get_week_rows(week)
        .await
        .map_err(ShiftError::Database)?;
    if rows.is_empty() {
        return Err(ShiftError::NotFound(format!(
            "No schedule uploaded for week starting {week}"
        )));
    }
    Ok(rows)
}

pub async fn load_week_view(store: &dyn ShiftStore, requested: Option<&str>) -> ShiftResult<WeekView> {
    let week = resolve_week(store, requested).await?;
    let rows = week_rows(store, &week).await?;
    let swaps = store.list_swaps().await.map_err(ShiftError::Database)?;

    build_week_view(&week, &rows, &swaps)
}

/// Effective shift of one employee on one date (`DD/MM/YYYY` or ISO).
pub async fn effective_shift_on(
    store: &dyn ShiftStore,
    employee_code: &str,
    date: &str,
) -> ShiftResult<EffectiveShiftResponse> {
    let date = normalize_date(date)?;
    let weeks = store.list_weeks().await.map_err(ShiftError::Database)?;

    let mut week = None;
    for candidate in weeks {
        if date.is_within_week(&candidate).unwrap_or(false) {
            week = Some(candidate);
            break;
        }
    }
    let week = week.ok_or_else(|| {
        ShiftError::NotFound(format!("No uploaded schedule covers {}", date.to_display()))
    })?;

    let rows = week_rows(store, &week).await?;
    let row = rows
        .iter()
        .find(|row| row.employee_code == employee_code)
        .ok_or_else(|| {
            ShiftError::NotFound(format!(
                "Employee {employee_code} is not on the schedule for week starting {week}"
            ))
        })?;

    let offset = (date.to_naive()? - week.to_naive()?).num_days() as usize;
    let base_shift = row.shifts.get(offset).cloned().unwrap_or_default();
    let swaps = store.list_swaps().await.map_err(ShiftError::Database)?;
    let effective = effective_shift(&base_shift, employee_code, &date, &swaps).to_string();

    Ok(EffectiveShiftResponse {
        employee_code: employee_code.to_string(),
        date,
        base_shift,
        effective_shift: effective,
    })
}
