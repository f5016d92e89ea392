//! Alert delivery.
//!
//! # Data Flow
//! ```text
//! Monitor decides to alert
//!     → Notifier::send(message)
//!     → telegram.rs (Bot API sendMessage) or log.rs (dry run)
//!     → bool: delivered or not
//! ```
//!
//! # Design Decisions
//! - Delivery is best-effort: no retries, failures only logged
//! - `send` never panics and never returns an error to the monitor
//! - Transport details stay behind the trait

pub mod log;
pub mod telegram;

use async_trait::async_trait;
use thiserror::Error;

pub use self::log::LogNotifier;
pub use self::telegram::TelegramNotifier;

/// Delivers human-readable alert text.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `message`. Returns false when delivery failed.
    async fn send(&self, message: &str) -> bool;
}

/// Reasons an alert could not be delivered.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The API endpoint could not be built from configuration.
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
