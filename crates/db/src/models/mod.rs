//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row, plus any `Deserialize` DTOs for writes.

pub mod deadline;
pub mod notification_log;
pub mod notification_rule;
pub mod profile;

pub use deadline::DeadlineCandidate;
pub use notification_log::{NotificationLog, SentPair};
pub use notification_rule::{NotificationRule, UpsertRule};
pub use profile::Profile;
