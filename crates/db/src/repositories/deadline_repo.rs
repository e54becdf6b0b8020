//! Repository for the `deadlines` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::deadline::DeadlineCandidate;

/// Read-only access to deadlines for the dispatcher.
///
/// Deadline CRUD belongs to the frontend-facing service; this side only
/// ever selects.
pub struct DeadlineRepo;

impl DeadlineRepo {
    /// List deadlines with an assigned recipient due in `[from, to]`
    /// inclusive, joined to the owning project's name.
    ///
    /// This is the wide look-ahead query; the per-project rule window is
    /// applied afterwards by the dispatcher. No ordering is guaranteed.
    pub async fn list_candidates(
        pool: &PgPool,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DeadlineCandidate>, sqlx::Error> {
        sqlx::query_as::<_, DeadlineCandidate>(
            "SELECT d.id, d.project_id, d.title, d.due_date, d.description, \
                    d.assignee_id, p.name AS project_name \
             FROM deadlines d \
             JOIN projects p ON p.id = d.project_id \
             WHERE d.assignee_id IS NOT NULL \
               AND d.due_date >= $1 \
               AND d.due_date <= $2",
        )
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }
}
