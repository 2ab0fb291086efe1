pub mod auth;
pub mod dashboard;
pub mod public;
pub mod schedule;
pub mod templates;
