//! Handler for the scheduler-facing dispatch trigger.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use duewatch_core::error::CoreError;

use crate::error::AppResult;
use crate::state::AppState;

/// Optional JSON body for the trigger request.
#[derive(Debug, Default, Deserialize)]
pub struct TriggerBody {
    /// Shared secret; preferred over the Authorization header so the
    /// header stays free for platform-level auth in fronting proxies.
    pub secret: Option<String>,
}

/// POST /api/v1/notifications/run
///
/// Validate the shared secret, execute one dispatch pass for today
/// (UTC), and return the run summary. The secret may arrive in the JSON
/// body (`{"secret": ...}`) or as `Authorization: Bearer ...`; the body
/// wins when both are present. With no `CRON_SECRET` configured the
/// endpoint is open.
///
/// Per-recipient delivery failures are reported inside the 200 summary;
/// only authorization and infrastructure failures produce error statuses.
pub async fn run_dispatch(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<TriggerBody>>,
) -> AppResult<Json<serde_json::Value>> {
    if let Some(expected) = state.config.cron_secret.as_deref() {
        let body_secret = body.as_ref().and_then(|b| b.secret.as_deref());
        let provided = body_secret.or_else(|| bearer_token(&headers));
        if provided != Some(expected) {
            return Err(CoreError::Unauthorized("Invalid trigger secret".to_string()).into());
        }
    }

    let today = Utc::now().date_naive();
    let summary = state.dispatcher.run(today).await?;

    let mut response = serde_json::json!({
        "ok": true,
        "sent": summary.sent,
        "sent_line": summary.sent_line,
        "sent_email": summary.sent_email,
        "deadlines_checked": summary.deadlines_checked,
    });
    if !summary.email_errors.is_empty() {
        response["email_errors"] = serde_json::json!(summary.email_errors);
    }
    Ok(Json(response))
}

/// Extract a bearer token from the Authorization header, if present.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::header::AUTHORIZATION;

    #[test]
    fn bearer_token_strips_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer s3cret".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("s3cret"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcg==".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
