//! Route definitions for the scheduler-facing `/notifications` resource.
//!
//! The trigger is the sole entry point for a dispatch run; it is gated
//! by the shared `CRON_SECRET`, not by per-user auth.

use axum::routing::post;
use axum::Router;

use crate::handlers::notify;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// POST   /run    -> run_dispatch
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/run", post(notify::run_dispatch))
}
