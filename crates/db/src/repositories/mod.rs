pub mod notification;
pub mod schedule;
pub mod swap;
pub mod user_role;
