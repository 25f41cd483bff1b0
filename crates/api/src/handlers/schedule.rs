use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::Value;
use shiftswap_core::{
    models::schedule::{EffectiveShiftResponse, UploadScheduleResponse, WeekView},
    refresh::RefreshTrigger,
    services::{schedule, upload},
};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{auth::CurrentPrincipal, error_handling::AppError},
};

#[derive(Debug, Default, Deserialize)]
pub struct WeekQuery {
    pub week_start_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EffectiveShiftQuery {
    pub employee_code: String,
    /// `DD/MM/YYYY` or `YYYY-MM-DD`
    pub date: String,
}

/// Replaces a week's schedule with the uploaded matrix.
///
/// The body is taken as raw JSON so that shape problems are reported by
/// the matrix validator with a precise message.
#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn upload_schedule(
    State(state): State<Arc<ApiState>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(document): Json<Value>,
) -> Result<Json<UploadScheduleResponse>, AppError> {
    let response = upload::upload_matrix(state.store.as_ref(), &principal, &document).await?;
    state.events.notify(RefreshTrigger::Mutation);

    Ok(Json(response))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn get_week(
    State(state): State<Arc<ApiState>>,
    CurrentPrincipal(_principal): CurrentPrincipal,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekView>, AppError> {
    let view =
        schedule::load_week_view(state.store.as_ref(), query.week_start_date.as_deref()).await?;

    Ok(Json(view))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn get_effective_shift(
    State(state): State<Arc<ApiState>>,
    CurrentPrincipal(_principal): CurrentPrincipal,
    Query(query): Query<EffectiveShiftQuery>,
) -> Result<Json<EffectiveShiftResponse>, AppError> {
    let response =
        schedule::effective_shift_on(state.store.as_ref(), &query.employee_code, &query.date)
            .await?;

    Ok(Json(response))
}
