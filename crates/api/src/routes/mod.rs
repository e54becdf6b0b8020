pub mod health;
pub mod notify;
pub mod rules;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /notifications/run                   trigger a dispatch run (POST)
/// /projects/{id}/notification-rule     get / upsert a project's rule
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Scheduler-facing dispatch trigger.
        .nest("/notifications", notify::router())
        // Per-project notification rule configuration.
        .nest("/projects", rules::router())
}
