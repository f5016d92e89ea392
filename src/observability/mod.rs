//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Probes, monitor loop, notifier
//!     → tracing events with structured fields (endpoint, code, failures, error)
//!     → logging.rs subscriber (text or JSON on stdout)
//! ```

pub mod logging;
