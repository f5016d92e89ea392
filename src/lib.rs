//! Website uptime monitor with Telegram alerts.

pub mod config;
pub mod lifecycle;
pub mod monitor;
pub mod notify;
pub mod observability;
pub mod probe;

pub use config::MonitorConfig;
pub use lifecycle::Shutdown;
pub use monitor::MonitorLoop;
pub use notify::Notifier;
pub use probe::{Endpoint, ProbeOutcome, Prober};
