//! Notification delivery channels.
//!
//! The string values must match the `notification_logs.channel` column;
//! they are the stable half of the per-day dedup key.

use serde::{Deserialize, Serialize};

/// A delivery medium through which a reminder reaches a recipient.
///
/// `Copy + Eq + Hash` so `(DbId, Channel)` pairs can key the in-memory
/// dedup set built from today's log rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// LINE message (Messaging API push or legacy Notify token).
    Line,
    /// Email via the configured provider.
    Email,
}

impl Channel {
    /// Stable string form stored in the notification log.
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Line => "line",
            Channel::Email => "email",
        }
    }

    /// Parse the stored string form back into a channel.
    ///
    /// Unknown values return `None`; the dispatcher ignores log rows it
    /// does not recognize rather than failing the run.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "line" => Some(Channel::Line),
            "email" => Some(Channel::Email),
            _ => None,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
