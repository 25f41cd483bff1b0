use chrono::{DateTime, Utc};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use shiftswap_core::{
    dates::IsoDate,
    models::{
        notification::Notification,
        principal::Role,
        schedule::ScheduleRow,
        swap::SwapRequest,
    },
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleRow {
    pub week_start_date: String,
    pub employee_code: String,
    pub sunday_shift: String,
    pub monday_shift: String,
    pub tuesday_shift: String,
    pub wednesday_shift: String,
    pub thursday_shift: String,
    pub friday_shift: String,
    pub saturday_shift: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSwapRequest {
    pub id: Uuid,
    pub date: String,
    pub from_employee_code: String,
    pub to_employee_code: String,
    pub from_shift: String,
    pub to_shift: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNotification {
    pub id: Uuid,
    pub user_id: String,
    pub message: String,
    pub kind: String,
    pub related_swap_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUserRole {
    pub principal_id: String,
    pub employee_code: Option<String>,
    pub role: String,
}

fn stored_date(value: &str) -> Result<IsoDate> {
    IsoDate::parse(value).ok_or_else(|| eyre!("Stored date {value} is not YYYY-MM-DD"))
}

impl TryFrom<DbScheduleRow> for ScheduleRow {
    type Error = eyre::Report;

    fn try_from(row: DbScheduleRow) -> Result<Self> {
        Ok(ScheduleRow {
            week_start_date: stored_date(&row.week_start_date)?,
            employee_code: row.employee_code,
            shifts: [
                row.sunday_shift,
                row.monday_shift,
                row.tuesday_shift,
                row.wednesday_shift,
                row.thursday_shift,
                row.friday_shift,
                row.saturday_shift,
            ],
            display_order: row.display_order,
        })
    }
}

impl TryFrom<DbSwapRequest> for SwapRequest {
    type Error = eyre::Report;

    fn try_from(row: DbSwapRequest) -> Result<Self> {
        Ok(SwapRequest {
            id: row.id,
            date: stored_date(&row.date)?,
            from_employee_code: row.from_employee_code,
            to_employee_code: row.to_employee_code,
            from_shift: row.from_shift,
            to_shift: row.to_shift,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<DbNotification> for Notification {
    type Error = eyre::Report;

    fn try_from(row: DbNotification) -> Result<Self> {
        Ok(Notification {
            id: row.id,
            user_id: row.user_id,
            message: row.message,
            kind: row.kind.parse()?,
            related_swap_id: row.related_swap_id,
            created_at: row.created_at,
        })
    }
}

impl DbUserRole {
    pub fn role(&self) -> Result<Role> {
        Ok(self.role.parse()?)
    }
}
