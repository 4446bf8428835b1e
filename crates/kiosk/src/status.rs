//! Background machine-status polling.
//!
//! A [`StatusPoller`] periodically asks its [`HealthSource`] for a health
//! summary and keeps the latest result in a shared snapshot the UI can read
//! at any time. Polling runs on a single tokio task; ticks are awaited
//! sequentially so a slow backend never causes overlapping requests.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use snackpoint_core::HealthSummary;

use crate::backend::BackendError;

/// Anything that can report machine health.
///
/// The returned future must be `Send` so the poller can drive it from a
/// spawned task.
pub trait HealthSource: Send + Sync + 'static {
    /// Fetch the current health summary.
    fn health(&self) -> impl Future<Output = Result<HealthSummary, BackendError>> + Send;
}

/// Latest observed machine status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    /// Most recent health summary, `None` until the first poll completes.
    pub health: Option<HealthSummary>,
    /// When the snapshot was last written.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Periodic health poller with start/stop lifecycle.
///
/// Dropping a running poller aborts its task.
pub struct StatusPoller<S> {
    source: Arc<S>,
    interval: Duration,
    state: Arc<Mutex<StatusSnapshot>>,
    task: Option<JoinHandle<()>>,
}

impl<S: HealthSource> StatusPoller<S> {
    /// Create a stopped poller around the given source.
    #[must_use]
    pub fn new(source: S, interval: Duration) -> Self {
        Self {
            source: Arc::new(source),
            interval,
            state: Arc::new(Mutex::new(StatusSnapshot::default())),
            task: None,
        }
    }

    /// Start polling. The first poll fires immediately.
    ///
    /// Calling `start` while already running is a no-op; there is never
    /// more than one polling task.
    pub fn start(&mut self) {
        if self.task.is_some() {
            debug!("status poller already running");
            return;
        }

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let period = self.interval;

        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let result = source.health().await;
                write_snapshot(&state, result);
            }
        }));
    }

    /// Stop polling. The snapshot keeps its last value.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether the polling task is currently running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Poll the source once, outside the background schedule.
    pub async fn poll_once(&self) {
        let result = self.source.health().await;
        write_snapshot(&self.state, result);
    }

    /// The latest observed status.
    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<S> Drop for StatusPoller<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Fold a poll result into the shared snapshot.
///
/// Failures become an unhealthy summary with a best-effort message; a tick
/// never panics and never ends the polling loop.
fn write_snapshot(state: &Mutex<StatusSnapshot>, result: Result<HealthSummary, BackendError>) {
    let health = match result {
        Ok(health) => health,
        Err(e) => {
            warn!(error = %e, "health poll failed");
            HealthSummary::unhealthy(e.payload_message())
        }
    };

    let mut snapshot = state.lock().unwrap_or_else(PoisonError::into_inner);
    snapshot.health = Some(health);
    snapshot.last_updated = Some(Utc::now());
}
