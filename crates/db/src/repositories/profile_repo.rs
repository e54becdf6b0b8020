//! Repository for the `profiles` table.

use duewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::Profile;

/// Column list for `profiles` queries.
const COLUMNS: &str =
    "id, display_name, email, line_user_id, line_notify_token, created_at, updated_at";

/// Read-only access to recipient profiles.
///
/// Profile writes (including the LINE identity-binding flow that fills
/// `line_user_id`) happen elsewhere; the dispatcher only consumes the
/// resulting identifiers.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Fetch the profiles for a set of assignees in one round trip.
    pub async fn list_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<Profile>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = ANY($1)");
        sqlx::query_as::<_, Profile>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
