pub mod analytics_repo;
pub use analytics_repo::{AnalyticsRepository, EventKind, EventStore};
pub mod template_repo;
pub use template_repo::{SettingsStore, TemplateRepository};
pub mod user_repo;
pub use user_repo::UserRepository;
