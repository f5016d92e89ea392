//! Probe result classification.

use serde::Serialize;
use std::fmt;

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// Reachable with a status in [200, 400).
    Success(u16),
    /// Reachable but the status is outside the success range.
    Failure(u16),
    /// Connecting or waiting for the response exceeded the deadline.
    Timeout,
    /// DNS, refusal, TLS, malformed URL or protocol fault.
    Error(String),
}

impl ProbeOutcome {
    /// Classify an HTTP status code.
    pub fn from_status(code: u16) -> Self {
        if (200..400).contains(&code) {
            ProbeOutcome::Success(code)
        } else {
            ProbeOutcome::Failure(code)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }

    /// Status code, when the endpoint answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Success(code) | ProbeOutcome::Failure(code) => Some(*code),
            ProbeOutcome::Timeout | ProbeOutcome::Error(_) => None,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Success(code) => write!(f, "up ({code})"),
            ProbeOutcome::Failure(code) => write!(f, "down ({code})"),
            ProbeOutcome::Timeout => f.write_str("timed out"),
            ProbeOutcome::Error(e) => write!(f, "error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range_boundaries() {
        assert_eq!(ProbeOutcome::from_status(199), ProbeOutcome::Failure(199));
        assert_eq!(ProbeOutcome::from_status(200), ProbeOutcome::Success(200));
        assert_eq!(ProbeOutcome::from_status(302), ProbeOutcome::Success(302));
        assert_eq!(ProbeOutcome::from_status(399), ProbeOutcome::Success(399));
        assert_eq!(ProbeOutcome::from_status(400), ProbeOutcome::Failure(400));
        assert_eq!(ProbeOutcome::from_status(503), ProbeOutcome::Failure(503));
    }

    #[test]
    fn test_status_code_only_when_answered() {
        assert_eq!(ProbeOutcome::Failure(500).status_code(), Some(500));
        assert_eq!(ProbeOutcome::Timeout.status_code(), None);
        assert!(!ProbeOutcome::Error("refused".into()).is_success());
    }
}
