use async_trait::async_trait;
use eyre::Result;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ShiftStore;
use crate::{
    dates::IsoDate,
    models::{
        notification::Notification,
        principal::Role,
        schedule::ScheduleRow,
        swap::{SwapRequest, SwapStatus},
    },
};

#[derive(Debug, Clone)]
struct UserEntry {
    principal_id: String,
    employee_code: Option<String>,
    role: Role,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: Vec<ScheduleRow>,
    swaps: Vec<SwapRequest>,
    notifications: Vec<Notification>,
    users: Vec<UserEntry>,
}

/// In-process [`ShiftStore`] holding everything behind one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a principal for role and notification lookups.
    pub async fn add_user(&self, principal_id: &str, employee_code: Option<&str>, role: Role) {
        let mut state = self.state.write().await;
        state.users.retain(|user| user.principal_id != principal_id);
        state.users.push(UserEntry {
            principal_id: principal_id.to_string(),
            employee_code: employee_code.map(str::to_string),
            role,
        });
    }

    pub async fn notification_count(&self) -> usize {
        self.state.read().await.notifications.len()
    }
}

#[async_trait]
impl ShiftStore for MemoryStore {
    async fn replace_week(&self, week: &IsoDate, rows: &[ScheduleRow]) -> Result<()> {
        let mut state = self.state.write().await;
        state.notifications.clear();
        state.swaps.clear();
        state.rows.retain(|row| row.week_start_date != *week);
        state.rows.extend_from_slice(rows);
        Ok(())
    }

    async fn list_weeks(&self) -> Result<Vec<IsoDate>> {
        let state = self.state.read().await;
        let mut weeks: Vec<IsoDate> = state
            .rows
            .iter()
            .map(|row| row.week_start_date.clone())
            .collect();
        weeks.sort_by(|a, b| b.cmp(a));
        weeks.dedup();
        Ok(weeks)
    }

    async fn get_week_rows(&self, week: &IsoDate) -> Result<Vec<ScheduleRow>> {
        let state = self.state.read().await;
        let mut rows: Vec<ScheduleRow> = state
            .rows
            .iter()
            .filter(|row| row.week_start_date == *week)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.display_order);
        Ok(rows)
    }

    async fn list_swaps(&self) -> Result<Vec<SwapRequest>> {
        let state = self.state.read().await;
        // Reverse insertion order first so equal timestamps stay newest first
        let mut swaps: Vec<SwapRequest> = state.swaps.iter().rev().cloned().collect();
        swaps.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(swaps)
    }

    async fn get_swap(&self, id: Uuid) -> Result<Option<SwapRequest>> {
        let state = self.state.read().await;
        Ok(state.swaps.iter().find(|swap| swap.id == id).cloned())
    }

    async fn insert_swap(&self, swap: &SwapRequest) -> Result<()> {
        self.state.write().await.swaps.push(swap.clone());
        Ok(())
    }

    async fn update_swap_status(
        &self,
        id: Uuid,
        expected: SwapStatus,
        next: SwapStatus,
    ) -> Result<Option<SwapRequest>> {
        let mut state = self.state.write().await;
        let updated = state
            .swaps
            .iter_mut()
            .find(|swap| swap.id == id && swap.status == expected)
            .map(|swap| {
                swap.status = next;
                swap.clone()
            });
        Ok(updated)
    }

    async fn insert_notification(&self, notification: &Notification) -> Result<()> {
        self.state
            .write()
            .await
            .notifications
            .push(notification.clone());
        Ok(())
    }

    async fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        let state = self.state.read().await;
        let mut notifications: Vec<Notification> = state
            .notifications
            .iter()
            .rev()
            .filter(|notification| notification.user_id == user_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn role_for_principal(&self, principal_id: &str) -> Result<Option<Role>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|user| user.principal_id == principal_id)
            .map(|user| user.role))
    }

    async fn principal_for_employee(&self, employee_code: &str) -> Result<Option<String>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|user| user.employee_code.as_deref() == Some(employee_code))
            .map(|user| user.principal_id.clone()))
    }
}
