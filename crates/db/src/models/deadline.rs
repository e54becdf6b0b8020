//! Deadline read model used by the dispatcher.

use chrono::NaiveDate;
use duewatch_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A deadline eligible for reminder dispatch, as projected by the
/// candidate selector.
///
/// `project_name` is denormalized from the `projects` join so message
/// composition needs no further reads; the struct is deliberately
/// decoupled from the raw table boundaries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeadlineCandidate {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub due_date: NaiveDate,
    pub description: Option<String>,
    /// Always present: the selector filters out unassigned deadlines.
    pub assignee_id: DbId,
    pub project_name: String,
}
