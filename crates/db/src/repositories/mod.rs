//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod deadline_repo;
pub mod notification_log_repo;
pub mod notification_rule_repo;
pub mod profile_repo;
pub mod project_repo;

pub use deadline_repo::DeadlineRepo;
pub use notification_log_repo::NotificationLogRepo;
pub use notification_rule_repo::NotificationRuleRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
