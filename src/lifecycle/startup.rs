//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the prober and notifier from configuration
//! - Verify the notification channel before monitoring begins
//!
//! # Design Decisions
//! - Fail fast: a notifier that cannot deliver the test message is fatal

use std::sync::Arc;
use thiserror::Error;

use crate::config::{ConfigError, MonitorConfig};
use crate::notify::{LogNotifier, Notifier, TelegramNotifier};
use crate::probe::HttpProber;

/// Message sent once at startup to prove the channel works.
pub const TEST_MESSAGE: &str = "Test message from Website Monitor";

/// Errors that abort startup. All map to exit status 1.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("notifier connectivity test failed")]
    NotifierUnreachable,
}

/// Send the test message. Errors if the notifier reports failure.
pub async fn verify_notifier(notifier: &dyn Notifier) -> Result<(), StartupError> {
    tracing::info!("Testing notifier connection...");
    if notifier.send(TEST_MESSAGE).await {
        tracing::info!("Notifier connection test successful");
        Ok(())
    } else {
        tracing::error!("Notifier connection test failed");
        Err(StartupError::NotifierUnreachable)
    }
}

/// Telegram notifier, or a log-only notifier when `dry_run` is set.
pub fn build_notifier(config: &MonitorConfig, dry_run: bool) -> Result<Arc<dyn Notifier>, StartupError> {
    if dry_run {
        tracing::warn!("Dry run: alerts will only be logged");
        return Ok(Arc::new(LogNotifier));
    }
    Ok(Arc::new(TelegramNotifier::new(&config.telegram)?))
}

pub fn build_prober(config: &MonitorConfig) -> Result<Arc<HttpProber>, StartupError> {
    Ok(Arc::new(HttpProber::new(&config.probe)?))
}
