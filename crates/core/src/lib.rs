//! Duewatch domain types and rules.
//!
//! This crate holds everything the reminder dispatcher needs that does not
//! touch the database or the network: shared ID/timestamp aliases, the
//! domain error type, the notification [`Channel`] enum, per-project
//! notification rule semantics (defaults, clamping, due-date window), and
//! the reminder message templates.

pub mod channel;
pub mod error;
pub mod message;
pub mod rules;
pub mod types;

pub use channel::Channel;
pub use error::CoreError;
pub use rules::EffectiveRule;
