//! Deadline reminder dispatch.
//!
//! This crate implements the scheduled notification pass: select
//! deadlines due within the look-ahead window, resolve each project's
//! notification rule, drop `(deadline, channel)` pairs already logged
//! today, attempt delivery over LINE and email, and append successful
//! sends to the dedup ledger.
//!
//! - [`Dispatcher`]: the run coordinator, one linear pass per trigger.
//! - [`RuleSet`]: per-run rule resolver with default fallback.
//! - [`delivery`]: channel transports (LINE push/legacy, Resend email)
//!   behind the [`LineSender`] / [`EmailSender`] trait seams.
//! - [`NotifyConfig`]: environment-driven channel configuration.

pub mod config;
pub mod delivery;
pub mod dispatcher;
pub mod rules;

pub use config::NotifyConfig;
pub use delivery::{
    EmailDelivery, EmailError, EmailSender, LineDelivery, LineError, LineSender, LineTransport,
};
pub use dispatcher::{DispatchError, Dispatcher, EmailFailure, RunSummary};
pub use rules::RuleSet;
