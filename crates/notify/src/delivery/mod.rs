//! Channel delivery transports.
//!
//! Each channel implements a small sender trait so the dispatcher can be
//! exercised in tests without network access; the real implementations
//! call the LINE and Resend HTTP APIs via `reqwest`.

pub mod email;
pub mod line;

pub use email::{EmailDelivery, EmailError};
pub use line::{LineDelivery, LineError, LineTransport};

use async_trait::async_trait;

/// Sends one LINE message over an already-selected transport.
#[async_trait]
pub trait LineSender: Send + Sync {
    async fn send(&self, transport: &LineTransport, text: &str) -> Result<(), LineError>;
}

/// Sends one reminder email.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError>;
}
