//! Log-only notifier for dry runs.

use async_trait::async_trait;

use crate::notify::Notifier;

/// Writes alerts to the log instead of delivering them. Always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &str) -> bool {
        tracing::info!(message = %message, "Alert (dry run)");
        true
    }
}
