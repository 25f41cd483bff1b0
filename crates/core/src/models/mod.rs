pub mod notification;
pub mod principal;
pub mod schedule;
pub mod swap;
