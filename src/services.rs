pub mod analytics;
pub mod auth;
pub mod carousel;
pub mod dashboard;
pub mod preview;
pub mod profile;
pub mod schedule;
pub mod storage;

pub use analytics::AnalyticsService;
pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use preview::PreviewHub;
pub use profile::ProfileService;
pub use storage::ImageStorage;
