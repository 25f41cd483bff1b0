use serde_json::Value;
use tracing::info;

use crate::{
    errors::{ShiftError, ShiftResult},
    models::{principal::Principal, schedule::UploadScheduleResponse},
    store::ShiftStore,
    validation::validate,
};

/// Validates `document` and makes it the schedule of its week.
///
/// Every swap and notification is purged along with the week's old rows,
/// whatever week they belonged to. Nothing is written unless the whole
/// document passes validation.
pub async fn upload_matrix(
    store: &dyn ShiftStore,
    principal: &Principal,
    document: &Value,
) -> ShiftResult<UploadScheduleResponse> {
    if !principal.is_admin() {
        return Err(ShiftError::Authorization(
            "Only administrators can upload schedules".to_string(),
        ));
    }

    let matrix = validate(document)?;
    let rows = matrix.to_schedule_rows();

    store
        .replace_week(&matrix.week_start_date, &rows)
        .await
        .map_err(ShiftError::Database)?;

    info!(
        week_start_date = %matrix.week_start_date,
        rows = rows.len(),
        uploaded_by = %principal.id,
        "Schedule uploaded; swaps and notifications cleared"
    );

    Ok(UploadScheduleResponse {
        week_start_date: matrix.week_start_date,
        rows: rows.len(),
    })
}
