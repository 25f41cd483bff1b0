//! Operations that combine the domain rules with a [`ShiftStore`].
//!
//! [`ShiftStore`]: crate::store::ShiftStore

pub mod notifications;
pub mod schedule;
pub mod swaps;
pub mod upload;
