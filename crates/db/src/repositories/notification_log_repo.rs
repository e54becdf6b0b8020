//! Repository for the `notification_logs` table (the dedup ledger).

use chrono::{Days, NaiveDate};
use duewatch_core::types::DbId;
use duewatch_core::Channel;
use sqlx::PgPool;

use crate::models::notification_log::SentPair;

/// Append-only access to the notification log.
///
/// Rows are never updated or deleted here; a row's existence for a
/// `(deadline, channel)` pair within a UTC calendar day is the sole
/// authority for "already notified today".
pub struct NotificationLogRepo;

impl NotificationLogRepo {
    /// Fetch all `(deadline, channel)` pairs logged on `day` (UTC) for
    /// the given deadlines, in one batched read.
    ///
    /// Rows with a channel value this build does not recognize are
    /// skipped rather than failing the run.
    pub async fn list_sent_on_day(
        pool: &PgPool,
        deadline_ids: &[DbId],
        day: NaiveDate,
    ) -> Result<Vec<SentPair>, sqlx::Error> {
        if deadline_ids.is_empty() {
            return Ok(Vec::new());
        }
        let day_start = day.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc();
        let day_end = day
            .checked_add_days(Days::new(1))
            .expect("next day is representable")
            .and_hms_opt(0, 0, 0)
            .expect("midnight is valid")
            .and_utc();

        let rows: Vec<(DbId, String)> = sqlx::query_as(
            "SELECT deadline_id, channel FROM notification_logs \
             WHERE deadline_id = ANY($1) \
               AND sent_at >= $2 \
               AND sent_at < $3",
        )
        .bind(deadline_ids)
        .bind(day_start)
        .bind(day_end)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(deadline_id, channel)| {
                Channel::parse(&channel).map(|channel| SentPair {
                    deadline_id,
                    channel,
                })
            })
            .collect())
    }

    /// Append a log row after a confirmed successful delivery.
    ///
    /// Returns `false` when the daily unique index rejects the row,
    /// meaning a concurrent run already logged this `(deadline, channel)`
    /// pair today; callers treat that as "already sent".
    pub async fn insert(
        pool: &PgPool,
        deadline_id: DbId,
        recipient: &str,
        channel: Channel,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO notification_logs (deadline_id, recipient, channel) \
             VALUES ($1, $2, $3)",
        )
        .bind(deadline_id)
        .bind(recipient)
        .bind(channel.as_str())
        .execute(pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
                tracing::debug!(
                    deadline_id,
                    channel = channel.as_str(),
                    "Daily unique index rejected log insert; treating as already sent"
                );
                Ok(false)
            }
            Err(other) => Err(other),
        }
    }
}
