pub mod events;
pub mod notifications;
pub mod schedule;
pub mod swaps;
