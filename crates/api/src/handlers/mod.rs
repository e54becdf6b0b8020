//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to `duewatch_db` repositories or the
//! `duewatch_notify` dispatcher and map errors via [`crate::error::AppError`].

pub mod notify;
pub mod rules;
