//! Handlers for per-project notification rules.

use axum::extract::{Path, State};
use axum::Json;

use duewatch_core::error::CoreError;
use duewatch_core::rules::EffectiveRule;
use duewatch_core::types::DbId;
use duewatch_db::models::notification_rule::UpsertRule;
use duewatch_db::repositories::{NotificationRuleRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/projects/{id}/notification-rule
///
/// Return the project's stored rule. When no row exists the server-wide
/// defaults are returned with `is_default: true` so clients can render
/// an unsaved form without a separate defaults endpoint.
pub async fn get_rule(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_project_exists(&state, project_id).await?;

    match NotificationRuleRepo::get_for_project(&state.pool, project_id).await? {
        Some(rule) => Ok(Json(serde_json::json!({
            "data": {
                "project_id": rule.project_id,
                "days_before": rule.days_before,
                "notify_line": rule.notify_line,
                "notify_email": rule.notify_email,
                "updated_at": rule.updated_at,
                "is_default": false,
            }
        }))),
        None => {
            let defaults = EffectiveRule::fallback(state.default_days_before);
            Ok(Json(serde_json::json!({
                "data": {
                    "project_id": project_id,
                    "days_before": defaults.days_before,
                    "notify_line": defaults.notify_line,
                    "notify_email": defaults.notify_email,
                    "is_default": true,
                }
            })))
        }
    }
}

/// PUT /api/v1/projects/{id}/notification-rule
///
/// Create or replace the project's rule. `days_before` is clamped to the
/// supported range rather than rejected, matching the dispatcher's own
/// tolerance for out-of-range values.
pub async fn upsert_rule(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpsertRule>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_project_exists(&state, project_id).await?;

    let rule = NotificationRuleRepo::upsert(&state.pool, project_id, &input).await?;

    Ok(Json(serde_json::json!({ "data": rule })))
}

async fn ensure_project_exists(state: &AppState, project_id: DbId) -> AppResult<()> {
    if !ProjectRepo::exists(&state.pool, project_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }
    Ok(())
}
