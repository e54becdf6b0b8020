//! Repository for the `projects` table.

use duewatch_core::types::DbId;
use sqlx::PgPool;

/// Minimal project access.
///
/// Project CRUD lives in the frontend-facing service; the dispatcher
/// reads project names through the candidate join, so only an existence
/// probe is needed here (for the notification-rule endpoints).
pub struct ProjectRepo;

impl ProjectRepo {
    /// Whether a project with the given id exists.
    pub async fn exists(pool: &PgPool, project_id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM projects WHERE id = $1")
            .bind(project_id)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }
}
