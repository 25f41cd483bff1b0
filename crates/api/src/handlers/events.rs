use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use tracing::info;

use crate::{ApiState, middleware::auth::CurrentPrincipal};

/// Server-sent refresh signals for the schedule and swap views.
pub async fn refresh_events(
    State(state): State<Arc<ApiState>>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(principal_id = %principal.id, "Client subscribed to refresh events");

    Sse::new(state.events.sse_stream()).keep_alive(KeepAlive::default())
}
