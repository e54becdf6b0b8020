//! Email delivery via the Resend HTTP API.

use std::time::Duration;

use async_trait::async_trait;

use super::EmailSender;

/// Resend send endpoint.
const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum length of a provider error detail kept in the run summary.
const DETAIL_MAX_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Email provider returned HTTP {status}: {detail}")]
    Provider { status: u16, detail: String },
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends reminder emails through Resend.
pub struct EmailDelivery {
    client: reqwest::Client,
    api_key: String,
    from_address: String,
}

impl EmailDelivery {
    /// Create a delivery client with the provider credential and sender
    /// address.
    pub fn new(api_key: String, from_address: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            api_key,
            from_address,
        }
    }
}

#[async_trait]
impl EmailSender for EmailDelivery {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        let body = serde_json::json!({
            "from": self.from_address,
            "to": [to],
            "subject": subject,
            "html": html,
        });
        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let raw = response.text().await.unwrap_or_default();
        Err(EmailError::Provider {
            status: status.as_u16(),
            detail: extract_detail(&raw),
        })
    }
}

/// Pull a human-readable detail out of a provider error body.
///
/// Resend errors are JSON with a `message` (sometimes `error`) field;
/// anything else is kept verbatim. The result is truncated to
/// [`DETAIL_MAX_LEN`] characters for the run summary.
fn extract_detail(raw: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| raw.to_string());
    truncate_detail(&detail)
}

/// Truncate on a character boundary to [`DETAIL_MAX_LEN`].
pub(crate) fn truncate_detail(detail: &str) -> String {
    detail.chars().take(DETAIL_MAX_LEN).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_detail_prefers_message_field() {
        let raw = r#"{"statusCode":422,"message":"Invalid `to` address","name":"validation_error"}"#;
        assert_eq!(extract_detail(raw), "Invalid `to` address");
    }

    #[test]
    fn extract_detail_falls_back_to_error_field() {
        let raw = r#"{"error":"rate limited"}"#;
        assert_eq!(extract_detail(raw), "rate limited");
    }

    #[test]
    fn extract_detail_keeps_non_json_bodies() {
        assert_eq!(extract_detail("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn detail_is_truncated_to_limit() {
        let long = "x".repeat(500);
        assert_eq!(extract_detail(&long).chars().count(), DETAIL_MAX_LEN);
    }

    #[test]
    fn truncate_respects_multibyte_boundaries() {
        let long = "截".repeat(300);
        let truncated = truncate_detail(&long);
        assert_eq!(truncated.chars().count(), DETAIL_MAX_LEN);
    }

    #[test]
    fn email_error_display_provider() {
        let err = EmailError::Provider {
            status: 422,
            detail: "bad address".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Email provider returned HTTP 422: bad address"
        );
    }
}
