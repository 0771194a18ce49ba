//! # Health Probe Subscription
//!
//! Periodically asks the backend whether it is alive and hands every result
//! to a callback. The probe runs on its own tokio task; the returned
//! [`HealthSubscription`] owns that task and stops it on `dispose()` or drop.
//!
//! ```text
//! start() ──► probe ──► callback ──► sleep(period) ──► probe ──► ...
//!                                                        ▲
//!                                     dispose() / drop ──┘ (task aborted)
//! ```
//!
//! The first probe fires immediately. Probes never overlap: the next tick is
//! scheduled only after the previous request finished.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::client::{Backend, probe};
use crate::core::health::HealthReport;

pub struct HealthSubscription {
    handle: Option<JoinHandle<()>>,
}

impl HealthSubscription {
    /// Spawn the probe loop. Must be called from inside a tokio runtime.
    pub fn start<F>(backend: Arc<dyn Backend>, period: Duration, mut on_report: F) -> Self
    where
        F: FnMut(HealthReport) + Send + 'static,
    {
        info!(
            "Starting health probe against {} every {:?}",
            backend.base_url(),
            period
        );
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let report = probe(backend.as_ref()).await;
                debug!("Health probe result: {:?}", report);
                on_report(report);
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Stop probing. Idempotent. A probe that is mid-request is abandoned and
    /// its result never reaches the callback.
    pub fn dispose(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("Health probe stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for HealthSubscription {
    fn drop(&mut self) {
        self.dispose();
    }
}
