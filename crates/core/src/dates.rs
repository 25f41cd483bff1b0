//! Calendar date handling shared by the schedule and swap models.
//!
//! Dates are stored as `YYYY-MM-DD` strings. Schedule weeks only have to
//! match that pattern, so arithmetic on them goes through chrono and can
//! still fail for strings such as `2024-02-31`.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{ShiftError, ShiftResult};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// A date string in storage format (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IsoDate(String);

impl IsoDate {
    /// Accepts any string shaped like `YYYY-MM-DD`, without a calendar check.
    pub fn parse(value: &str) -> Option<Self> {
        is_iso_pattern(value).then(|| Self(value.to_string()))
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date.format(ISO_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_naive(&self) -> ShiftResult<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, ISO_FORMAT)
            .map_err(|_| ShiftError::Validation(format!("{} is not a calendar date", self.0)))
    }

    /// Renders the date the way the schedule grid shows it (`DD/MM/YYYY`).
    pub fn to_display(&self) -> String {
        let (year, rest) = self.0.split_at(4);
        format!("{}/{}/{}", &rest[4..6], &rest[1..3], year)
    }

    /// Date of the given day offset (0 = Sunday) inside the week starting here.
    pub fn plus_days(&self, days: usize) -> ShiftResult<Self> {
        let start = self.to_naive()?;
        let offset = i64::try_from(days)
            .map_err(|_| ShiftError::Validation(format!("Day offset {days} is out of range")))?;
        Ok(Self::from_naive(start + Duration::days(offset)))
    }

    /// Whether `self` falls inside the seven days starting at `week_start`.
    pub fn is_within_week(&self, week_start: &IsoDate) -> ShiftResult<bool> {
        let start = week_start.to_naive()?;
        let date = self.to_naive()?;
        let offset = (date - start).num_days();
        Ok((0..7).contains(&offset))
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for IsoDate {
    type Error = ShiftError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_iso_pattern(&value) {
            Ok(Self(value))
        } else {
            Err(ShiftError::Validation(format!(
                "{value} is not formatted as YYYY-MM-DD"
            )))
        }
    }
}

impl From<IsoDate> for String {
    fn from(date: IsoDate) -> Self {
        date.0
    }
}

/// Four digits, dash, two digits, dash, two digits.
pub fn is_iso_pattern(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn is_display_pattern(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        })
}

/// Converts a date from display format (`DD/MM/YYYY`) to storage format.
///
/// Input already in storage format passes through unchanged.
pub fn normalize_date(input: &str) -> ShiftResult<IsoDate> {
    let trimmed = input.trim();
    if is_iso_pattern(trimmed) {
        return Ok(IsoDate(trimmed.to_string()));
    }
    if is_display_pattern(trimmed) {
        let day = &trimmed[0..2];
        let month = &trimmed[3..5];
        let year = &trimmed[6..10];
        return Ok(IsoDate(format!("{year}-{month}-{day}")));
    }
    Err(ShiftError::Validation(format!(
        "{input} is neither DD/MM/YYYY nor YYYY-MM-DD"
    )))
}
