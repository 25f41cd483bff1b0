use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::ApiState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    /// Most recent uploaded week, when the store answered.
    latest_week: Option<String>,
}

#[derive(Serialize)]
struct VersionResponse {
    name: &'static str,
    version: &'static str,
}

/// Reports `ok` while the shift store answers, `unavailable` (503) otherwise.
async fn health_check(State(state): State<Arc<ApiState>>) -> (StatusCode, Json<HealthResponse>) {
    match state.store.list_weeks().await {
        Ok(weeks) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                latest_week: weeks.into_iter().max().map(|week| week.as_str().to_string()),
            }),
        ),
        Err(e) => {
            warn!("Health check could not reach the shift store: {e:?}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                    latest_week: None,
                }),
            )
        }
    }
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
