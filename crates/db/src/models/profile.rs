//! Recipient profile entity.

use duewatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profiles` table.
///
/// A recipient may be reachable over zero, one, or both channels;
/// each identifier field is independently optional.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub display_name: Option<String>,
    pub email: Option<String>,
    /// LINE Messaging API push identifier (preferred transport).
    pub line_user_id: Option<String>,
    /// Legacy LINE Notify per-user token (fallback transport).
    pub line_notify_token: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
