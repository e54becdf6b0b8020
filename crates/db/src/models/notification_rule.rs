//! Notification rule entity and write DTO.

use duewatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notification_rules` table.
///
/// Keyed by project; at most one row per project (upsert semantics).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationRule {
    pub project_id: DbId,
    pub days_before: i32,
    pub notify_line: bool,
    pub notify_email: bool,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a project's rule.
///
/// `days_before` is clamped to [0, 365] by the repository before it is
/// written; see [`duewatch_core::rules::clamp_days_before`].
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertRule {
    pub days_before: i32,
    pub notify_line: bool,
    pub notify_email: bool,
}
