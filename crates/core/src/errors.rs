use thiserror::Error;

/// Rejections produced while checking an uploaded shift matrix.
///
/// Each rule of the upload document has its own variant so callers can
/// tell exactly which check failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Document must be a JSON object")]
    NotAnObject,

    #[error("Missing week_start_date")]
    MissingWeekStartDate,

    #[error("week_start_date must be a string formatted as YYYY-MM-DD")]
    InvalidWeekStartDate,

    #[error("Missing shifts")]
    MissingShifts,

    #[error("shifts must be a list")]
    ShiftsNotAList,

    #[error("shifts must contain at least one row")]
    EmptyShifts,

    #[error("Row {index} must be an object")]
    RowNotAnObject { index: usize },

    #[error("Row {index} must have a non-empty string employee_code")]
    MissingEmployeeCode { index: usize },

    #[error("Row {index}: {field} must be a string")]
    InvalidDayField { index: usize, field: &'static str },

    #[error("Row {index}: employee_code {code} appears more than once")]
    DuplicateEmployeeCode { index: usize, code: String },
}

#[derive(Error, Debug)]
pub enum ShiftError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid schedule document: {0}")]
    Matrix(#[from] MatrixError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type ShiftResult<T> = Result<T, ShiftError>;
