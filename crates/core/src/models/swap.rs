use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{dates::IsoDate, errors::ShiftError};

/// Lifecycle of a swap request. Everything but `Pending` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

impl SwapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Pending => "pending",
            SwapStatus::Accepted => "accepted",
            SwapStatus::Rejected => "rejected",
            SwapStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SwapStatus::Pending)
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwapStatus {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SwapStatus::Pending),
            "accepted" => Ok(SwapStatus::Accepted),
            "rejected" => Ok(SwapStatus::Rejected),
            "cancelled" => Ok(SwapStatus::Cancelled),
            other => Err(ShiftError::Validation(format!("Unknown swap status {other}"))),
        }
    }
}

/// A response to a pending swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapAction {
    Accept,
    Reject,
    Cancel,
}

impl SwapAction {
    pub fn target_status(&self) -> SwapStatus {
        match self {
            SwapAction::Accept => SwapStatus::Accepted,
            SwapAction::Reject => SwapStatus::Rejected,
            SwapAction::Cancel => SwapStatus::Cancelled,
        }
    }
}

impl fmt::Display for SwapAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwapAction::Accept => "accept",
            SwapAction::Reject => "reject",
            SwapAction::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub id: Uuid,
    pub date: IsoDate,
    pub from_employee_code: String,
    pub to_employee_code: String,
    /// Shift codes as they were when the swap was requested.
    pub from_shift: String,
    pub to_shift: String,
    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
}

impl SwapRequest {
    pub fn involves(&self, employee_code: &str) -> bool {
        self.from_employee_code == employee_code || self.to_employee_code == employee_code
    }

    pub fn applies_to(&self, employee_code: &str, date: &IsoDate) -> bool {
        self.date == *date && self.involves(employee_code)
    }

    /// The other party of the swap, as seen from `employee_code`.
    pub fn counterpart_of(&self, employee_code: &str) -> &str {
        if self.from_employee_code == employee_code {
            &self.to_employee_code
        } else {
            &self.from_employee_code
        }
    }
}

/// A selected cell of the schedule grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub employee_code: String,
    /// 0 is the identifier column, 1..=7 are Sunday..Saturday.
    pub column: usize,
}

impl GridCell {
    pub fn new(employee_code: impl Into<String>, column: usize) -> Self {
        Self {
            employee_code: employee_code.into(),
            column,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSwapRequest {
    /// Week the cells belong to; the latest uploaded week when absent.
    pub week_start_date: Option<String>,
    pub first: GridCell,
    pub second: GridCell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapResponse {
    pub swap: Option<SwapRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapHistoryResponse {
    pub swaps: Vec<SwapRequest>,
}
