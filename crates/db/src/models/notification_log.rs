//! Notification log (dedup ledger) entities.

use duewatch_core::types::{DbId, Timestamp};
use duewatch_core::Channel;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `notification_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationLog {
    pub id: DbId,
    pub deadline_id: DbId,
    /// Human-readable recipient label: push id for LINE push, email
    /// address otherwise (or the `line-user` placeholder).
    pub recipient: String,
    pub channel: String,
    pub sent_at: Timestamp,
}

/// A `(deadline, channel)` pair already notified today.
///
/// The batched dedup read returns these; the dispatcher collects them
/// into a `HashSet` before any dispatch begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentPair {
    pub deadline_id: DbId,
    pub channel: Channel,
}
