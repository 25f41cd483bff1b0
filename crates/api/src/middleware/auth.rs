//! # Principal Extraction
//!
//! Identity is established upstream; requests arrive with the caller's id
//! in `x-principal-id` and, for employees, their employee code in
//! `x-employee-code`. The role comes from the `user_roles` table and
//! defaults to an ordinary user.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use shiftswap_core::{
    errors::ShiftError,
    models::principal::{Principal, Role},
};
use tracing::debug;

use crate::{ApiState, middleware::error_handling::AppError};

pub const PRINCIPAL_ID_HEADER: &str = "x-principal-id";
pub const EMPLOYEE_CODE_HEADER: &str = "x-employee-code";

/// The signed-in caller of a request.
///
/// ```ignore
/// async fn handler(CurrentPrincipal(principal): CurrentPrincipal) -> String {
///     principal.id
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

fn header_value(headers: &HeaderMap, name: &str) -> Result<Option<String>, ShiftError> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| ShiftError::Authentication(format!("Header {name} is not valid text")))?
        .trim();

    Ok((!value.is_empty()).then(|| value.to_string()))
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let id = header_value(&parts.headers, PRINCIPAL_ID_HEADER)?.ok_or_else(|| {
            ShiftError::Authentication(format!("Missing {PRINCIPAL_ID_HEADER} header"))
        })?;
        let employee_code = header_value(&parts.headers, EMPLOYEE_CODE_HEADER)?;

        let role = state
            .store
            .role_for_principal(&id)
            .await
            .map_err(ShiftError::Database)?
            .unwrap_or(Role::User);

        if role == Role::User && employee_code.is_none() {
            return Err(AppError(ShiftError::Authentication(format!(
                "Missing {EMPLOYEE_CODE_HEADER} header"
            ))));
        }

        debug!(principal_id = %id, role = %role.as_str(), "Principal resolved");

        Ok(Self(Principal {
            id,
            employee_code,
            role,
        }))
    }
}
