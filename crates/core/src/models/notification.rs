use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ShiftError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SwapRequested,
    SwapAccepted,
    SwapRejected,
    SwapCancelled,
    /// An admin applied a swap directly.
    SwapApplied,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::SwapRequested => "swap_requested",
            NotificationKind::SwapAccepted => "swap_accepted",
            NotificationKind::SwapRejected => "swap_rejected",
            NotificationKind::SwapCancelled => "swap_cancelled",
            NotificationKind::SwapApplied => "swap_applied",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swap_requested" => Ok(NotificationKind::SwapRequested),
            "swap_accepted" => Ok(NotificationKind::SwapAccepted),
            "swap_rejected" => Ok(NotificationKind::SwapRejected),
            "swap_cancelled" => Ok(NotificationKind::SwapCancelled),
            "swap_applied" => Ok(NotificationKind::SwapApplied),
            other => Err(ShiftError::Validation(format!(
                "Unknown notification kind {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: String,
    pub message: String,
    pub kind: NotificationKind,
    pub related_swap_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: impl Into<String>,
        kind: NotificationKind,
        message: impl Into<String>,
        related_swap_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            message: message.into(),
            kind,
            related_swap_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
}
