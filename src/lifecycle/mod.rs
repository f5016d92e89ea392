//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Build prober/notifier → Notifier self-test → Start monitor loop
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Monitor loop exits → Process exits 0
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: an unusable notification channel is fatal at startup
//! - Every failure after startup degrades and continues

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
