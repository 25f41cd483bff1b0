//! # ShiftSwap Core
//!
//! Domain types and rules for weekly shift schedules and shift swaps:
//! validation of uploaded matrices, the swap request state machine and
//! the effective-shift resolver, plus the storage seam the other crates
//! implement.

pub mod dates;
pub mod errors;
pub mod history;
pub mod models;
pub mod refresh;
pub mod resolver;
pub mod services;
pub mod store;
pub mod swap_engine;
pub mod validation;
pub mod view;
