use axum::{
    Json,
    extract::{Path, Query, State},
};
use shiftswap_core::{
    models::swap::{CreateSwapRequest, SwapAction, SwapHistoryResponse, SwapResponse},
    refresh::RefreshTrigger,
    services::swaps,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    handlers::schedule::WeekQuery,
    middleware::{auth::CurrentPrincipal, error_handling::AppError},
};

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn create_swap(
    State(state): State<Arc<ApiState>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(payload): Json<CreateSwapRequest>,
) -> Result<Json<SwapResponse>, AppError> {
    let swap = swaps::create_swap(state.store.as_ref(), &principal, &payload).await?;
    if swap.is_some() {
        state.events.notify(RefreshTrigger::Mutation);
    }

    Ok(Json(SwapResponse { swap }))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn list_swaps(
    State(state): State<Arc<ApiState>>,
    CurrentPrincipal(_principal): CurrentPrincipal,
    Query(query): Query<WeekQuery>,
) -> Result<Json<SwapHistoryResponse>, AppError> {
    let swaps = swaps::swap_history(state.store.as_ref(), query.week_start_date.as_deref()).await?;

    Ok(Json(SwapHistoryResponse { swaps }))
}

async fn respond(
    state: &ApiState,
    principal: CurrentPrincipal,
    id: Uuid,
    action: SwapAction,
) -> Result<Json<SwapResponse>, AppError> {
    let swap = swaps::respond_to_swap(state.store.as_ref(), &principal.0, id, action).await?;
    if swap.is_some() {
        state.events.notify(RefreshTrigger::Mutation);
    }

    Ok(Json(SwapResponse { swap }))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn accept_swap(
    State(state): State<Arc<ApiState>>,
    principal: CurrentPrincipal,
    Path(id): Path<Uuid>,
) -> Result<Json<SwapResponse>, AppError> {
    respond(&state, principal, id, SwapAction::Accept).await
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn reject_swap(
    State(state): State<Arc<ApiState>>,
    principal: CurrentPrincipal,
    Path(id): Path<Uuid>,
) -> Result<Json<SwapResponse>, AppError> {
    respond(&state, principal, id, SwapAction::Reject).await
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn cancel_swap(
    State(state): State<Arc<ApiState>>,
    principal: CurrentPrincipal,
    Path(id): Path<Uuid>,
) -> Result<Json<SwapResponse>, AppError> {
    respond(&state, principal, id, SwapAction::Cancel).await
}
