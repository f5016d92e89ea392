//! Periodic check loop.
//!
//! # Responsibilities
//! - Fire a tick on a fixed interval
//! - Probe every endpoint concurrently within a tick
//! - Apply the threshold policy and dispatch alerts
//! - Contain panics to the endpoint that raised them

use futures_util::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tokio::time::{self, MissedTickBehavior};

use crate::config::{MonitorConfig, ScheduleConfig};
use crate::monitor::counter::FailureCounter;
use crate::monitor::policy::{Alert, AlertPolicy};
use crate::notify::Notifier;
use crate::probe::{Endpoint, ProbeOutcome, Prober};

/// What happened to the alert for one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    /// Policy did not call for an alert.
    NotRequired,
    /// Notifier accepted the alert.
    Sent,
    /// Notifier reported a failure. Not retried.
    Failed,
}

/// Result of checking one endpoint during a tick.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub endpoint: Endpoint,
    /// `None` when the check failed internally before producing an outcome.
    pub outcome: Option<ProbeOutcome>,
    /// Failure streak after this check.
    pub streak: u32,
    pub alert: Delivery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_error: Option<String>,
}

/// Result of one tick across all endpoints, ordered by endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickReport {
    pub checks: Vec<CheckReport>,
}

impl TickReport {
    pub fn get(&self, endpoint: &Endpoint) -> Option<&CheckReport> {
        self.checks.iter().find(|c| &c.endpoint == endpoint)
    }

    /// Number of alerts handed to the notifier, delivered or not.
    pub fn alerts_attempted(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.alert != Delivery::NotRequired)
            .count()
    }

    pub fn down_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| !matches!(c.outcome, Some(ref o) if o.is_success()))
            .count()
    }
}

/// Owns the failure counter and drives probes on a fixed cadence.
#[derive(Clone)]
pub struct MonitorLoop {
    endpoints: Arc<[Endpoint]>,
    counter: Arc<FailureCounter>,
    prober: Arc<dyn Prober>,
    notifier: Arc<dyn Notifier>,
    policy: AlertPolicy,
    schedule: ScheduleConfig,
}

impl MonitorLoop {
    pub fn new(
        endpoints: Vec<Endpoint>,
        prober: Arc<dyn Prober>,
        notifier: Arc<dyn Notifier>,
        policy: AlertPolicy,
        schedule: ScheduleConfig,
    ) -> Self {
        let counter = Arc::new(FailureCounter::new(&endpoints));
        Self {
            endpoints: endpoints.into(),
            counter,
            prober,
            notifier,
            policy,
            schedule,
        }
    }

    /// Build a loop for the endpoints, policy and schedule in `config`.
    pub fn from_config(
        config: &MonitorConfig,
        prober: Arc<dyn Prober>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let endpoints = config.endpoints.iter().map(|e| Endpoint::from(e.as_str())).collect();
        Self::new(
            endpoints,
            prober,
            notifier,
            AlertPolicy::from(&config.alert),
            config.schedule.clone(),
        )
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn counter(&self) -> &Arc<FailureCounter> {
        &self.counter
    }

    pub fn policy(&self) -> AlertPolicy {
        self.policy
    }

    /// Run ticks until shutdown is signalled. The first tick fires immediately.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let period = Duration::from_secs(self.schedule.interval_secs);
        let allow_overlap = self.schedule.allow_overlap;

        tracing::info!(
            endpoints = self.endpoints.len(),
            interval_secs = self.schedule.interval_secs,
            threshold = self.policy.threshold,
            mode = ?self.policy.mode,
            allow_overlap,
            "Monitor loop starting"
        );

        let mut ticker = time::interval(period);
        if !allow_overlap {
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        }

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if allow_overlap {
                        let this = self.clone();
                        tokio::spawn(async move {
                            this.on_tick().await;
                        });
                    } else {
                        self.on_tick().await;
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Monitor loop received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Check every endpoint once, concurrently, and wait for all checks.
    pub async fn on_tick(&self) -> TickReport {
        let mut tasks = JoinSet::new();
        for endpoint in self.endpoints.iter().cloned() {
            let this = self.clone();
            tasks.spawn(async move { this.guarded_check(endpoint).await });
        }

        let mut checks = Vec::with_capacity(self.endpoints.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(report) => checks.push(report),
                Err(e) => tracing::error!(error = %e, "Check task did not complete"),
            }
        }
        checks.sort_by(|a, b| a.endpoint.cmp(&b.endpoint));

        let report = TickReport { checks };
        tracing::debug!(
            checked = report.checks.len(),
            down = report.down_count(),
            alerts = report.alerts_attempted(),
            "Tick complete"
        );
        report
    }

    /// Run one check, converting a panic into an internal-error report.
    async fn guarded_check(&self, endpoint: Endpoint) -> CheckReport {
        match AssertUnwindSafe(self.check_endpoint(endpoint.clone()))
            .catch_unwind()
            .await
        {
            Ok(report) => report,
            Err(panic) => {
                let cause = panic_message(panic.as_ref());
                tracing::error!(endpoint = %endpoint, cause = %cause, "Check panicked");
                let alert = Alert::Internal {
                    endpoint: endpoint.clone(),
                    cause: cause.clone(),
                };
                let delivery = self.dispatch(&alert).await;
                CheckReport {
                    streak: self.counter.get(&endpoint),
                    endpoint,
                    outcome: None,
                    alert: delivery,
                    internal_error: Some(cause),
                }
            }
        }
    }

    async fn check_endpoint(&self, endpoint: Endpoint) -> CheckReport {
        let outcome = self.prober.probe(&endpoint).await;

        let streak = match &outcome {
            ProbeOutcome::Success(code) => {
                let previous = self.counter.record_success(&endpoint);
                if previous > 0 {
                    tracing::info!(endpoint = %endpoint, code, previous_failures = previous, "Endpoint recovered");
                } else {
                    tracing::info!(endpoint = %endpoint, code, "Endpoint is up");
                }
                0
            }
            other => {
                let failures = self.counter.record_failure(&endpoint);
                tracing::warn!(endpoint = %endpoint, outcome = %other, failures, "Endpoint is down");
                failures
            }
        };

        let alert = match Alert::for_outcome(&endpoint, &outcome, streak) {
            Some(alert) if self.policy.should_alert(streak) => self.dispatch(&alert).await,
            _ => Delivery::NotRequired,
        };

        CheckReport {
            endpoint,
            outcome: Some(outcome),
            streak,
            alert,
            internal_error: None,
        }
    }

    async fn dispatch(&self, alert: &Alert) -> Delivery {
        let message = alert.to_string();
        if self.notifier.send(&message).await {
            Delivery::Sent
        } else {
            tracing::error!(message = %message, "Alert was not delivered");
            Delivery::Failed
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_extracts_text() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("kaboom"));
        assert_eq!(panic_message(boxed.as_ref()), "kaboom");

        let boxed: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }

    #[test]
    fn test_tick_report_counts() {
        let report = TickReport {
            checks: vec![
                CheckReport {
                    endpoint: Endpoint::from("https://a.example"),
                    outcome: Some(ProbeOutcome::Success(200)),
                    streak: 0,
                    alert: Delivery::NotRequired,
                    internal_error: None,
                },
                CheckReport {
                    endpoint: Endpoint::from("https://b.example"),
                    outcome: Some(ProbeOutcome::Timeout),
                    streak: 5,
                    alert: Delivery::Failed,
                    internal_error: None,
                },
                CheckReport {
                    endpoint: Endpoint::from("https://c.example"),
                    outcome: None,
                    streak: 0,
                    alert: Delivery::Sent,
                    internal_error: Some("boom".into()),
                },
            ],
        };

        assert_eq!(report.down_count(), 2);
        assert_eq!(report.alerts_attempted(), 2);
        assert_eq!(report.get(&Endpoint::from("https://b.example")).unwrap().streak, 5);
    }
}
