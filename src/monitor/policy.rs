//! Threshold policy and alert text.
//!
//! # Alert Rules
//! ```text
//! Repeat: notify when streak >= threshold (every failing tick past the threshold)
//! Edge:   notify when streak == threshold (once per outage)
//! ```

use std::fmt;

use crate::config::{AlertConfig, AlertMode};
use crate::probe::{Endpoint, ProbeOutcome};

/// Decides whether a failure streak warrants a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPolicy {
    pub threshold: u32,
    pub mode: AlertMode,
}

impl AlertPolicy {
    pub fn new(threshold: u32, mode: AlertMode) -> Self {
        Self { threshold, mode }
    }

    pub fn should_alert(&self, streak: u32) -> bool {
        match self.mode {
            AlertMode::Repeat => streak >= self.threshold,
            AlertMode::Edge => streak == self.threshold,
        }
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::from(&AlertConfig::default())
    }
}

impl From<&AlertConfig> for AlertPolicy {
    fn from(config: &AlertConfig) -> Self {
        Self::new(config.threshold, config.mode)
    }
}

/// A notification about one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// Endpoint answered with a non-success status.
    Down { endpoint: Endpoint, code: u16, streak: u32 },
    /// Endpoint did not answer in time.
    TimedOut { endpoint: Endpoint, streak: u32 },
    /// Endpoint could not be reached.
    Unreachable { endpoint: Endpoint, error: String, streak: u32 },
    /// The check itself failed unexpectedly.
    Internal { endpoint: Endpoint, cause: String },
}

impl Alert {
    /// Alert for a non-success outcome. Returns `None` for `Success`.
    pub fn for_outcome(endpoint: &Endpoint, outcome: &ProbeOutcome, streak: u32) -> Option<Self> {
        let endpoint = endpoint.clone();
        match outcome {
            ProbeOutcome::Success(_) => None,
            ProbeOutcome::Failure(code) => Some(Alert::Down { endpoint, code: *code, streak }),
            ProbeOutcome::Timeout => Some(Alert::TimedOut { endpoint, streak }),
            ProbeOutcome::Error(error) => Some(Alert::Unreachable {
                endpoint,
                error: error.clone(),
                streak,
            }),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::Down { endpoint, code, streak } => {
                write!(f, "{endpoint} is down with code: {code}. Failed {streak} times.")
            }
            Alert::TimedOut { endpoint, streak } => {
                write!(f, "{endpoint} is down. Connection timed out after {streak} attempts.")
            }
            Alert::Unreachable { endpoint, error, streak } => {
                write!(f, "{endpoint} is down. Error: {error}. Failed {streak} times.")
            }
            Alert::Internal { endpoint, cause } => {
                write!(f, "Internal error while checking {endpoint}: {cause}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_mode_alerts_at_and_past_threshold() {
        let policy = AlertPolicy::new(5, AlertMode::Repeat);
        assert!(!policy.should_alert(0));
        assert!(!policy.should_alert(4));
        assert!(policy.should_alert(5));
        assert!(policy.should_alert(6));
        assert!(policy.should_alert(100));
    }

    #[test]
    fn test_edge_mode_alerts_once() {
        let policy = AlertPolicy::new(5, AlertMode::Edge);
        assert!(!policy.should_alert(4));
        assert!(policy.should_alert(5));
        assert!(!policy.should_alert(6));
    }

    #[test]
    fn test_messages_distinguish_outcome_kinds() {
        let ep = Endpoint::from("https://example.com");

        let down = Alert::for_outcome(&ep, &ProbeOutcome::Failure(500), 5).unwrap();
        assert_eq!(down.to_string(), "https://example.com is down with code: 500. Failed 5 times.");

        let timeout = Alert::for_outcome(&ep, &ProbeOutcome::Timeout, 5).unwrap();
        assert_eq!(
            timeout.to_string(),
            "https://example.com is down. Connection timed out after 5 attempts."
        );

        let error = Alert::for_outcome(&ep, &ProbeOutcome::Error("dns error".into()), 7).unwrap();
        assert_eq!(
            error.to_string(),
            "https://example.com is down. Error: dns error. Failed 7 times."
        );

        assert!(Alert::for_outcome(&ep, &ProbeOutcome::Success(200), 0).is_none());
    }
}
