//! Endpoint probing.
//!
//! # Data Flow
//! ```text
//! Monitor tick
//!     → Prober::probe(endpoint)
//!     → single bounded GET (http.rs)
//!     → ProbeOutcome (outcome.rs)
//! ```
//!
//! # Design Decisions
//! - Probes fail closed: every fault becomes a ProbeOutcome, nothing propagates
//! - Success is any status in [200, 400)
//! - Timeouts are reported separately from other transport errors

pub mod endpoint;
pub mod http;
pub mod outcome;

use async_trait::async_trait;

pub use endpoint::Endpoint;
pub use http::HttpProber;
pub use outcome::ProbeOutcome;

/// Performs a single check against an endpoint.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe `endpoint` once. Must not panic on network faults.
    async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome;
}
