//! Notification channel configuration.

use duewatch_core::rules::DEFAULT_DAYS_BEFORE;

/// Fixed selector look-ahead in days.
///
/// Wider than any per-project `days_before` a write can store relative
/// to practical use, so the per-project window filter never misses a
/// legitimate candidate inside it; the filter, not this bound, decides
/// what gets sent.
pub const MAX_LOOKAHEAD_DAYS: u64 = 31;

/// Default sender address when `NOTIFY_FROM_EMAIL` is not set.
const DEFAULT_FROM_ADDRESS: &str = "notify@resend.dev";

/// Dispatcher configuration loaded from environment variables.
///
/// Missing provider credentials are valid states: the matching channel
/// is silently skipped, never attempted.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Fallback `days_before` for projects without a stored rule.
    pub default_days_before: i32,
    /// LINE Messaging API channel access token (enables the push transport).
    pub line_channel_token: Option<String>,
    /// Resend API key (enables the email channel).
    pub resend_api_key: Option<String>,
    /// RFC 5322 "From" address for reminder emails.
    pub from_email: String,
}

impl NotifyConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                    | Required | Default              |
    /// |-----------------------------|----------|----------------------|
    /// | `DAYS_BEFORE`               | no       | `3`                  |
    /// | `LINE_CHANNEL_ACCESS_TOKEN` | no       | —                    |
    /// | `RESEND_API_KEY`            | no       | —                    |
    /// | `NOTIFY_FROM_EMAIL`         | no       | `notify@resend.dev`  |
    ///
    /// An unparseable or negative `DAYS_BEFORE` falls back to the
    /// default rather than failing startup.
    pub fn from_env() -> Self {
        let default_days_before = std::env::var("DAYS_BEFORE")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .map(|v| v.max(0))
            .unwrap_or(DEFAULT_DAYS_BEFORE);

        Self {
            default_days_before,
            line_channel_token: std::env::var("LINE_CHANNEL_ACCESS_TOKEN")
                .ok()
                .filter(|v| !v.is_empty()),
            resend_api_key: std::env::var("RESEND_API_KEY").ok().filter(|v| !v.is_empty()),
            from_email: std::env::var("NOTIFY_FROM_EMAIL")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
        }
    }
}
