//! Refresh signals for connected clients.
//!
//! The database change feed, the polling ticker and mutations handled by
//! this server all publish into one broadcast channel. Every event only
//! tells clients to refetch; a client that falls behind loses nothing by
//! skipping to the newest one.

use std::{convert::Infallible, time::Duration};

use axum::response::sse::Event;
use futures::{Stream, StreamExt, stream};
use serde::{Deserialize, Serialize};
use shiftswap_core::refresh::{RefreshCoordinator, RefreshTicket, RefreshTrigger};
use shiftswap_db::{DbPool, listener::listen_for_swap_changes};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, error, warn};

/// Events buffered per receiver before lagging clients start skipping.
const EVENT_BUFFER_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SwapEvent {
    /// Sent once when a client subscribes.
    Connected { generation: u64 },
    /// Schedule or swap data may have changed.
    Refresh {
        generation: u64,
        trigger: RefreshTrigger,
    },
}

impl SwapEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::Refresh { .. } => "refresh",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SwapEvents {
    tx: broadcast::Sender<SwapEvent>,
    refresh: RefreshCoordinator,
}

impl SwapEvents {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self {
            tx,
            refresh: RefreshCoordinator::new(),
        }
    }

    /// Publishes a refresh signal and returns its ticket.
    pub fn notify(&self, trigger: RefreshTrigger) -> RefreshTicket {
        let ticket = self.refresh.begin();
        let event = SwapEvent::Refresh {
            generation: ticket.generation(),
            trigger,
        };

        match self.tx.send(event) {
            Ok(receivers) => debug!(?trigger, receivers, "Refresh broadcast"),
            Err(_) => debug!(?trigger, "No subscribers for refresh"),
        }
        ticket
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SwapEvent> {
        self.tx.subscribe()
    }

    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.refresh
    }

    /// SSE stream: one `connected` event, then every refresh until shutdown.
    pub fn sse_stream(&self) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static + use<> {
        let connected = SwapEvent::Connected {
            generation: self.refresh.current_generation(),
        };
        let rx = self.subscribe();

        let refreshes = stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(event) => return Some((event, rx)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Client fell behind; skipping to newest refresh");
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });

        stream::once(async move { connected })
            .chain(refreshes)
            .map(|event| Ok::<_, Infallible>(to_sse(&event)))
    }
}

impl Default for SwapEvents {
    fn default() -> Self {
        Self::new()
    }
}

fn to_sse(event: &SwapEvent) -> Event {
    let sse = Event::default().event(event.name());
    match serde_json::to_string(event) {
        Ok(json) => sse.data(json),
        Err(err) => {
            error!(?err, "Failed to serialize swap event");
            sse.data("{}")
        }
    }
}

/// Forwards database change notifications into `events`.
pub fn spawn_change_listener(pool: DbPool, events: SwapEvents) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = listen_for_swap_changes(&pool, |operation| {
            debug!(operation, "Swap table changed");
            events.notify(RefreshTrigger::StoreChange);
        })
        .await;

        if let Err(err) = result {
            error!(error = %err, "Swap change listener stopped; relying on polling");
        }
    })
}

/// Publishes a polling refresh every `period`.
pub fn spawn_poller(events: SwapEvents, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            events.notify(RefreshTrigger::Poll);
        }
    })
}
