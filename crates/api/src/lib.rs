//! # ShiftSwap API
//!
//! HTTP server for the weekly shift matrix: schedule uploads, the
//! effective-shift view, swap requests and their notifications, plus a
//! server-sent event stream telling clients when to refresh.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Extract the request and call into `shiftswap_core::services`
//! - **Middleware**: Principal extraction and error mapping
//! - **Events**: Refresh broadcasting from mutations, the database change feed and polling
//! - **Config**: Environment configuration

/// Configuration module for API settings
pub mod config;
/// Refresh signal broadcasting
pub mod events;
/// Request handlers
pub mod handlers;
/// Principal extraction and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, StatusCode, header},
};
use eyre::Result;
use shiftswap_core::store::ShiftStore;
use shiftswap_db::{DbPool, store::PgShiftStore};
use tokio::net::TcpListener;
use tower::{BoxError, ServiceBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    events::SwapEvents,
    middleware::auth::{EMPLOYEE_CODE_HEADER, PRINCIPAL_ID_HEADER},
};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub store: Arc<dyn ShiftStore>,
    pub events: SwapEvents,
}

impl ApiState {
    pub fn new(store: Arc<dyn ShiftStore>) -> Self {
        Self {
            store,
            events: SwapEvents::new(),
        }
    }
}

/// Builds the router with every endpoint and request tracing.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Schedule upload and views
        .merge(routes::schedule::routes())
        // Swap requests and transitions
        .merge(routes::swaps::routes())
        .merge(routes::notifications::routes())
        .merge(routes::events::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn handle_timeout(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "could not complete operation".to_string(),
        )
    }
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(PRINCIPAL_ID_HEADER),
            header::HeaderName::from_static(EMPLOYEE_CODE_HEADER),
        ])
        .allow_origin(origins)
        .allow_credentials(true))
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| eyre::eyre!("Could not install tracing subscriber: {err}"))
}

/// Starts the API server with the provided configuration and database connection
///
/// Installs the tracing subscriber, starts the swap change listener and
/// the polling ticker, then serves until the listener socket fails.
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = shiftswap_api::config::ApiConfig::from_env()?;
/// let db_pool = shiftswap_db::create_pool(&config.database_url, config.database_max_connections).await?;
/// shiftswap_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    init_tracing(&config.log_level)?;

    let store = Arc::new(PgShiftStore::new(db_pool.clone()));
    let state = Arc::new(ApiState::new(store));

    events::spawn_change_listener(db_pool, state.events.clone());
    match config.poll_interval() {
        Some(period) => {
            events::spawn_poller(state.events.clone(), period);
        }
        None => warn!("REFRESH_POLL_INTERVAL_SECONDS is 0; clients rely on the change feed only"),
    }

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
