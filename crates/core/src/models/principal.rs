use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ShiftError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl FromStr for Role {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(ShiftError::Validation(format!("Unknown role {other}"))),
        }
    }
}

/// The signed-in caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identifier issued by the identity provider.
    pub id: String,
    pub employee_code: Option<String>,
    pub role: Role,
}

impl Principal {
    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            employee_code: None,
            role: Role::Admin,
        }
    }

    pub fn employee(id: impl Into<String>, employee_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            employee_code: Some(employee_code.into()),
            role: Role::User,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether the principal is the employee identified by `employee_code`.
    pub fn is_employee(&self, employee_code: &str) -> bool {
        self.employee_code.as_deref() == Some(employee_code)
    }
}
