use axum::{Json, extract::State};
use shiftswap_core::{models::notification::NotificationListResponse, services::notifications};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{auth::CurrentPrincipal, error_handling::AppError},
};

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn list_notifications(
    State(state): State<Arc<ApiState>>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<NotificationListResponse>, AppError> {
    let notifications =
        notifications::list_for_principal(state.store.as_ref(), &principal).await?;

    Ok(Json(NotificationListResponse { notifications }))
}
