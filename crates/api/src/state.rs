use std::sync::Arc;

use duewatch_notify::Dispatcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: duewatch_db::DbPool,
    /// Server configuration (trigger secret, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// The reminder dispatch coordinator.
    pub dispatcher: Arc<Dispatcher>,
    /// Server-wide fallback for projects without a stored rule.
    pub default_days_before: i32,
}
