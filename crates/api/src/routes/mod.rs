pub mod events;
pub mod health;
pub mod notifications;
pub mod schedule;
pub mod swaps;
