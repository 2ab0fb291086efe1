pub mod auth;
pub mod dashboard;
pub mod profile;
pub mod schedule;
