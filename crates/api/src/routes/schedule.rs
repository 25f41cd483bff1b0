use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/schedule", get(handlers::schedule::get_week))
        .route(
            "/api/schedule/upload",
            post(handlers::schedule::upload_schedule),
        )
        .route(
            "/api/schedule/effective",
            get(handlers::schedule::get_effective_shift),
        )
}
