//! Repository for the `notification_rules` table.

use duewatch_core::rules::clamp_days_before;
use duewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification_rule::{NotificationRule, UpsertRule};

/// Column list for `notification_rules` queries.
const COLUMNS: &str = "project_id, days_before, notify_line, notify_email, updated_at";

/// Provides read and upsert operations for per-project notification rules.
pub struct NotificationRuleRepo;

impl NotificationRuleRepo {
    /// Fetch the stored rule for one project, if any.
    ///
    /// `None` is a normal state meaning "use the system default".
    pub async fn get_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<NotificationRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_rules WHERE project_id = $1");
        sqlx::query_as::<_, NotificationRule>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch stored rules for a set of projects in one round trip.
    ///
    /// Projects without a row are simply absent from the result.
    pub async fn list_for_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<NotificationRule>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM notification_rules WHERE project_id = ANY($1)");
        sqlx::query_as::<_, NotificationRule>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await
    }

    /// Create or replace a project's rule, returning the stored row.
    ///
    /// `days_before` is clamped to [0, 365] here, on the write path;
    /// reads trust the stored value.
    pub async fn upsert(
        pool: &PgPool,
        project_id: DbId,
        input: &UpsertRule,
    ) -> Result<NotificationRule, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_rules \
                 (project_id, days_before, notify_line, notify_email, updated_at) \
             VALUES ($1, $2, $3, $4, NOW()) \
             ON CONFLICT (project_id) DO UPDATE SET \
                 days_before = EXCLUDED.days_before, \
                 notify_line = EXCLUDED.notify_line, \
                 notify_email = EXCLUDED.notify_email, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationRule>(&query)
            .bind(project_id)
            .bind(clamp_days_before(input.days_before))
            .bind(input.notify_line)
            .bind(input.notify_email)
            .fetch_one(pool)
            .await
    }
}
