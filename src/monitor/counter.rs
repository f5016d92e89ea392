//! Per-endpoint consecutive failure counts.
//!
//! # Design Decisions
//! - Backed by `DashMap`; each update runs under the key's shard lock so
//!   increment-then-read is atomic across concurrent ticks
//! - Entries are created at startup and never removed

use dashmap::DashMap;
use std::collections::BTreeMap;

use crate::probe::Endpoint;

/// Consecutive non-success observations per endpoint since the last success.
#[derive(Debug, Default)]
pub struct FailureCounter {
    inner: DashMap<Endpoint, u32>,
}

impl FailureCounter {
    /// Create a counter with every endpoint at zero.
    pub fn new<'a>(endpoints: impl IntoIterator<Item = &'a Endpoint>) -> Self {
        let counter = Self::default();
        for endpoint in endpoints {
            counter.register(endpoint.clone());
        }
        counter
    }

    /// Start tracking `endpoint` at zero. Existing counts are kept.
    pub fn register(&self, endpoint: Endpoint) {
        self.inner.entry(endpoint).or_insert(0);
    }

    /// Reset the streak to zero. Returns the streak that was cleared.
    pub fn record_success(&self, endpoint: &Endpoint) -> u32 {
        match self.inner.get_mut(endpoint) {
            Some(mut count) => std::mem::replace(count.value_mut(), 0),
            None => {
                self.inner.insert(endpoint.clone(), 0);
                0
            }
        }
    }

    /// Extend the streak by one. Returns the new streak.
    pub fn record_failure(&self, endpoint: &Endpoint) -> u32 {
        let mut count = self.inner.entry(endpoint.clone()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Current streak, zero for unknown endpoints.
    pub fn get(&self, endpoint: &Endpoint) -> u32 {
        self.inner.get(endpoint).map(|r| *r.value()).unwrap_or(0)
    }

    /// Point-in-time copy of every streak, ordered by endpoint.
    pub fn snapshot(&self) -> BTreeMap<Endpoint, u32> {
        self.inner
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_starts_at_zero() {
        let endpoints = [Endpoint::from("https://a.example"), Endpoint::from("https://b.example")];
        let counter = FailureCounter::new(&endpoints);
        assert_eq!(counter.len(), 2);
        assert!(counter.snapshot().values().all(|&c| c == 0));
    }

    #[test]
    fn test_failure_increments_and_success_resets() {
        let ep = Endpoint::from("https://a.example");
        let counter = FailureCounter::new([&ep]);

        assert_eq!(counter.record_failure(&ep), 1);
        assert_eq!(counter.record_failure(&ep), 2);
        assert_eq!(counter.record_failure(&ep), 3);
        assert_eq!(counter.record_success(&ep), 3);
        assert_eq!(counter.get(&ep), 0);
        assert_eq!(counter.record_success(&ep), 0);
        assert_eq!(counter.record_failure(&ep), 1);
    }

    #[test]
    fn test_register_keeps_existing_count() {
        let ep = Endpoint::from("https://a.example");
        let counter = FailureCounter::new([&ep]);
        counter.record_failure(&ep);
        counter.register(ep.clone());
        assert_eq!(counter.get(&ep), 1);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let ep = Endpoint::from("https://a.example");
        let counter = Arc::new(FailureCounter::new([&ep]));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = counter.clone();
                let ep = ep.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        counter.record_failure(&ep);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(counter.get(&ep), 8000);
    }
}
