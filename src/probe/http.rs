//! HTTP prober.
//!
//! # Responsibilities
//! - Issue one GET per probe with a connect deadline and an overall deadline
//! - Classify the status code or the failure
//! - Release the connection on every exit path
//!
//! # Design Decisions
//! - Connection pooling is disabled: dropping the response closes the socket
//! - The body is never read; only the status line matters
//! - Redirects are followed so the final status is classified

use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::Duration;
use url::Url;

use crate::config::ProbeConfig;
use crate::probe::{Endpoint, ProbeOutcome, Prober};

/// Prober backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    /// Build a prober from configuration.
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .pool_max_idle_per_host(0)
            .user_agent(config.user_agent.as_str());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
        let url = match Url::parse(endpoint.as_str()) {
            Ok(url) => url,
            Err(e) => return ProbeOutcome::Error(format!("invalid URL: {e}")),
        };
        if !matches!(url.scheme(), "http" | "https") {
            return ProbeOutcome::Error(format!("unsupported scheme: {}", url.scheme()));
        }

        match self.client.get(url).send().await {
            // The response owns the connection; it is dropped at the end of this arm.
            Ok(response) => ProbeOutcome::from_status(response.status().as_u16()),
            Err(e) if e.is_timeout() => ProbeOutcome::Timeout,
            Err(e) => ProbeOutcome::Error(describe(&e)),
        }
    }
}

/// Render an error and its source chain as one line.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
