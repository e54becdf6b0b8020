//! LINE delivery: Messaging API push with legacy Notify fallback.
//!
//! The two transports are mutually exclusive per recipient and resolved
//! once, before any attempt: push wins when a channel-wide access token
//! is configured and the recipient has bound a push identifier; the
//! legacy per-user token is the fallback; otherwise the channel is
//! silently skipped.

use std::time::Duration;

use async_trait::async_trait;
use duewatch_db::models::Profile;

use super::LineSender;

/// LINE Messaging API push endpoint.
const LINE_PUSH_URL: &str = "https://api.line.me/v2/bot/message/push";

/// Legacy LINE Notify endpoint (per-user token, form-encoded).
const LINE_NOTIFY_URL: &str = "https://notify-api.line.me/api/notify";

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Recipient label fallback when a legacy-token recipient has no email.
const LEGACY_PLACEHOLDER: &str = "line-user";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for LINE delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The LINE API returned a non-2xx status code.
    #[error("LINE API returned HTTP {0}")]
    Provider(u16),

    /// A push was attempted without a channel access token. Transport
    /// selection prevents this; the variant keeps the send path total.
    #[error("LINE channel access token not configured")]
    MissingCredential,
}

// ---------------------------------------------------------------------------
// Transport selection
// ---------------------------------------------------------------------------

/// The transport chosen for one recipient, resolved before any attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineTransport {
    /// Messaging API push to a bound user identifier.
    Push { to: String },
    /// Legacy Notify call authenticated by the recipient's own token.
    Legacy { token: String },
}

impl LineTransport {
    /// Pick the transport for a recipient, or `None` when the channel
    /// is unreachable for them (a silent skip, not a failure).
    ///
    /// Push requires both the channel credential and the recipient's
    /// push identifier; it takes priority and the legacy token is then
    /// never consulted.
    pub fn select(push_configured: bool, profile: &Profile) -> Option<Self> {
        if push_configured {
            if let Some(to) = profile.line_user_id.as_deref().filter(|v| !v.is_empty()) {
                return Some(LineTransport::Push { to: to.to_string() });
            }
        }
        profile
            .line_notify_token
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(|token| LineTransport::Legacy {
                token: token.to_string(),
            })
    }

    /// The recipient label written to the notification log.
    ///
    /// The push identifier is stable and meaningful; a legacy token is
    /// not, so those log rows fall back to the recipient's email or a
    /// placeholder.
    pub fn recipient_label(&self, profile: &Profile) -> String {
        match self {
            LineTransport::Push { to } => to.clone(),
            LineTransport::Legacy { .. } => profile
                .email
                .clone()
                .unwrap_or_else(|| LEGACY_PLACEHOLDER.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// LineDelivery
// ---------------------------------------------------------------------------

/// Sends reminder messages through the LINE HTTP APIs.
pub struct LineDelivery {
    client: reqwest::Client,
    channel_token: Option<String>,
}

impl LineDelivery {
    /// Create a delivery client. `channel_token` enables the push
    /// transport when present.
    pub fn new(channel_token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            channel_token,
        }
    }

    async fn send_push(&self, to: &str, text: &str) -> Result<(), LineError> {
        let token = self
            .channel_token
            .as_deref()
            .ok_or(LineError::MissingCredential)?;
        let body = serde_json::json!({
            "to": to,
            "messages": [{ "type": "text", "text": text }],
        });
        let response = self
            .client
            .post(LINE_PUSH_URL)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(LineError::Provider(response.status().as_u16()));
        }
        Ok(())
    }

    async fn send_legacy(&self, token: &str, text: &str) -> Result<(), LineError> {
        let response = self
            .client
            .post(LINE_NOTIFY_URL)
            .bearer_auth(token)
            .form(&[("message", text)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(LineError::Provider(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl LineSender for LineDelivery {
    async fn send(&self, transport: &LineTransport, text: &str) -> Result<(), LineError> {
        match transport {
            LineTransport::Push { to } => self.send_push(to, text).await,
            LineTransport::Legacy { token } => self.send_legacy(token, text).await,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(
        email: Option<&str>,
        line_user_id: Option<&str>,
        line_notify_token: Option<&str>,
    ) -> Profile {
        Profile {
            id: 1,
            display_name: Some("Rin".to_string()),
            email: email.map(str::to_string),
            line_user_id: line_user_id.map(str::to_string),
            line_notify_token: line_notify_token.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn push_wins_when_credential_and_identifier_present() {
        let p = profile(Some("rin@example.com"), Some("U123"), Some("legacy-token"));
        let transport = LineTransport::select(true, &p);
        assert_eq!(
            transport,
            Some(LineTransport::Push {
                to: "U123".to_string()
            })
        );
    }

    #[test]
    fn legacy_used_when_push_credential_missing() {
        let p = profile(None, Some("U123"), Some("legacy-token"));
        let transport = LineTransport::select(false, &p);
        assert_eq!(
            transport,
            Some(LineTransport::Legacy {
                token: "legacy-token".to_string()
            })
        );
    }

    #[test]
    fn legacy_used_when_recipient_has_no_push_identifier() {
        let p = profile(None, None, Some("legacy-token"));
        let transport = LineTransport::select(true, &p);
        assert_eq!(
            transport,
            Some(LineTransport::Legacy {
                token: "legacy-token".to_string()
            })
        );
    }

    #[test]
    fn no_transport_when_recipient_unreachable() {
        let p = profile(Some("rin@example.com"), None, None);
        assert_eq!(LineTransport::select(true, &p), None);
        assert_eq!(LineTransport::select(false, &p), None);
    }

    #[test]
    fn empty_identifiers_count_as_absent() {
        let p = profile(None, Some(""), Some(""));
        assert_eq!(LineTransport::select(true, &p), None);
    }

    #[test]
    fn push_label_is_the_push_identifier() {
        let p = profile(Some("rin@example.com"), Some("U123"), None);
        let transport = LineTransport::select(true, &p).unwrap();
        assert_eq!(transport.recipient_label(&p), "U123");
    }

    #[test]
    fn legacy_label_falls_back_to_email_then_placeholder() {
        let with_email = profile(Some("rin@example.com"), None, Some("t"));
        let transport = LineTransport::select(false, &with_email).unwrap();
        assert_eq!(transport.recipient_label(&with_email), "rin@example.com");

        let without_email = profile(None, None, Some("t"));
        let transport = LineTransport::select(false, &without_email).unwrap();
        assert_eq!(transport.recipient_label(&without_email), "line-user");
    }

    #[test]
    fn line_error_display_provider() {
        assert_eq!(
            LineError::Provider(429).to_string(),
            "LINE API returned HTTP 429"
        );
    }
}
