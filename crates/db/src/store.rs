use async_trait::async_trait;
use eyre::Result;
use shiftswap_core::{
    dates::IsoDate,
    models::{
        notification::Notification,
        principal::Role,
        schedule::ScheduleRow,
        swap::{SwapRequest, SwapStatus},
    },
    store::ShiftStore,
};
use uuid::Uuid;

use crate::{DbPool, repositories};

/// [`ShiftStore`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgShiftStore {
    pool: DbPool,
}

impl PgShiftStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShiftStore for PgShiftStore {
    async fn replace_week(&self, week: &IsoDate, rows: &[ScheduleRow]) -> Result<()> {
        repositories::schedule::replace_week(&self.pool, week, rows).await
    }

    async fn list_weeks(&self) -> Result<Vec<IsoDate>> {
        repositories::schedule::list_weeks(&self.pool).await
    }

    async fn get_week_rows(&self, week: &IsoDate) -> Result<Vec<ScheduleRow>> {
        repositories::schedule::get_week_rows(&self.pool, week).await
    }

    async fn list_swaps(&self) -> Result<Vec<SwapRequest>> {
        repositories::swap::list_swaps(&self.pool).await
    }

    async fn get_swap(&self, id: Uuid) -> Result<Option<SwapRequest>> {
        repositories::swap::get_swap(&self.pool, id).await
    }

    async fn insert_swap(&self, swap: &SwapRequest) -> Result<()> {
        repositories::swap::insert_swap(&self.pool, swap).await
    }

    async fn update_swap_status(
        &self,
        id: Uuid,
        expected: SwapStatus,
        next: SwapStatus,
    ) -> Result<Option<SwapRequest>> {
        repositories::swap::update_swap_status(&self.pool, id, expected, next).await
    }

    async fn insert_notification(&self, notification: &Notification) -> Result<()> {
        repositories::notification::insert_notification(&self.pool, notification).await
    }

    async fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        repositories::notification::list_notifications_for_user(&self.pool, user_id).await
    }

    async fn role_for_principal(&self, principal_id: &str) -> Result<Option<Role>> {
        repositories::user_role::get_user_role(&self.pool, principal_id)
            .await?
            .map(|user_role| user_role.role())
            .transpose()
    }

    async fn principal_for_employee(&self, employee_code: &str) -> Result<Option<String>> {
        repositories::user_role::get_principal_for_employee(&self.pool, employee_code).await
    }
}
