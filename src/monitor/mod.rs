//! Failure tracking and the monitor loop.
//!
//! # Data Flow
//! ```text
//! Periodic timer (scheduler.rs)
//!     → one task per endpoint
//!     → Prober::probe
//!     → counter.rs (reset on success, +1 otherwise)
//!     → policy.rs (threshold check, alert text)
//!     → Notifier::send
//! ```
//!
//! # Design Decisions
//! - Counter state is owned by the loop and shared only through `Arc`
//! - Endpoints are independent; a panic in one check is reported, not propagated
//! - Alert delivery is awaited inside the endpoint's own task, so a slow
//!   notifier never delays other endpoints
//! - Counters are not reset when an alert fires (repeat mode)

pub mod counter;
pub mod policy;
pub mod scheduler;

pub use counter::FailureCounter;
pub use policy::{Alert, AlertPolicy};
pub use scheduler::{CheckReport, Delivery, MonitorLoop, TickReport};
