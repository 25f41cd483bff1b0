use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/swaps",
            get(handlers::swaps::list_swaps).post(handlers::swaps::create_swap),
        )
        .route("/api/swaps/:id/accept", post(handlers::swaps::accept_swap))
        .route("/api/swaps/:id/reject", post(handlers::swaps::reject_swap))
        .route("/api/swaps/:id/cancel", post(handlers::swaps::cancel_swap))
}
