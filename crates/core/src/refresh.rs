//! Generation counter for refreshes triggered from several sources.
//!
//! The change feed and the polling ticker both request refreshes and may
//! fire at the same time. Each refresh takes a ticket when it starts; a
//! result is only worth publishing while its ticket is still the newest.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};

/// What caused a refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTrigger {
    /// The store reported a change to swap data.
    StoreChange,
    /// The fixed polling interval elapsed.
    Poll,
    /// A mutation went through this server.
    Mutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RefreshCoordinator {
    generation: Arc<AtomicU64>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a refresh, superseding every ticket issued before.
    pub fn begin(&self) -> RefreshTicket {
        RefreshTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
