//! Route definitions for per-project notification rules.

use axum::routing::get;
use axum::Router;

use crate::handlers::rules;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /{id}/notification-rule    -> get_rule
/// PUT    /{id}/notification-rule    -> upsert_rule
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}/notification-rule",
        get(rules::get_rule).put(rules::upsert_rule),
    )
}
