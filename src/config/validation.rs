//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, threshold > 0)
//! - Reject empty or duplicated endpoint lists
//! - Require notifier credentials unless alerts are only logged
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::MonitorConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no endpoints configured")]
    NoEndpoints,

    #[error("endpoint #{0} is blank")]
    BlankEndpoint(usize),

    #[error("endpoint {0} is listed more than once")]
    DuplicateEndpoint(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("telegram.{0} is not set")]
    MissingCredential(&'static str),
}

/// Validate a loaded configuration.
///
/// `require_notifier` is false when alerts are only logged (dry run), in which
/// case missing Telegram credentials are accepted.
pub fn validate_config(
    config: &MonitorConfig,
    require_notifier: bool,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.endpoints.is_empty() {
        errors.push(ValidationError::NoEndpoints);
    }

    let mut seen = HashSet::new();
    for (i, endpoint) in config.endpoints.iter().enumerate() {
        if endpoint.trim().is_empty() {
            errors.push(ValidationError::BlankEndpoint(i));
        } else if !seen.insert(endpoint.as_str()) {
            errors.push(ValidationError::DuplicateEndpoint(endpoint.clone()));
        }
    }

    if config.schedule.interval_secs == 0 {
        errors.push(ValidationError::Zero("schedule.interval_secs"));
    }
    if config.probe.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("probe.connect_timeout_secs"));
    }
    if config.probe.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("probe.request_timeout_secs"));
    }
    if config.alert.threshold == 0 {
        errors.push(ValidationError::Zero("alert.threshold"));
    }

    if require_notifier {
        if config.telegram.bot_token.trim().is_empty() {
            errors.push(ValidationError::MissingCredential("bot_token"));
        }
        if config.telegram.chat_id.trim().is_empty() {
            errors.push(ValidationError::MissingCredential("chat_id"));
        }
        if config.telegram.timeout_secs == 0 {
            errors.push(ValidationError::Zero("telegram.timeout_secs"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
