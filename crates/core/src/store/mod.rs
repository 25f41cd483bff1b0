//! Storage seam between the domain rules and a concrete backend.
//!
//! The PostgreSQL implementation lives in `shiftswap-db`; [`MemoryStore`]
//! backs tests and local experiments.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use crate::{
    dates::IsoDate,
    models::{
        notification::Notification,
        principal::Role,
        schedule::ScheduleRow,
        swap::{SwapRequest, SwapStatus},
    },
};

#[async_trait]
pub trait ShiftStore: Send + Sync {
    /// Replaces the rows of `week` with `rows` and purges every swap and
    /// notification, all or nothing.
    async fn replace_week(&self, week: &IsoDate, rows: &[ScheduleRow]) -> Result<()>;

    /// Weeks that have stored rows, most recent first.
    async fn list_weeks(&self) -> Result<Vec<IsoDate>>;

    /// Rows of `week` ordered by display order.
    async fn get_week_rows(&self, week: &IsoDate) -> Result<Vec<ScheduleRow>>;

    /// All swap requests, newest first.
    async fn list_swaps(&self) -> Result<Vec<SwapRequest>>;

    async fn get_swap(&self, id: Uuid) -> Result<Option<SwapRequest>>;

    async fn insert_swap(&self, swap: &SwapRequest) -> Result<()>;

    /// Moves swap `id` from `expected` to `next`.
    ///
    /// Returns `None` when the swap is missing or no longer in `expected`.
    async fn update_swap_status(
        &self,
        id: Uuid,
        expected: SwapStatus,
        next: SwapStatus,
    ) -> Result<Option<SwapRequest>>;

    async fn insert_notification(&self, notification: &Notification) -> Result<()>;

    /// Notifications addressed to `user_id`, newest first.
    async fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;

    async fn role_for_principal(&self, principal_id: &str) -> Result<Option<Role>>;

    /// Principal id of the user signed in as `employee_code`, if any.
    async fn principal_for_employee(&self, employee_code: &str) -> Result<Option<String>>;
}
