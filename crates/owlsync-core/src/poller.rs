// ── Scheduled poll driver ──
//
// Realizes the host-scheduler contract: one refresh per tick at a fixed
// cadence, ticks serialized per coordinator (the loop awaits each
// refresh before selecting again). Auth failures halt the schedule
// until the user reconfigures; transient failures keep it running.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::coordinator::Coordinator;
use crate::error::RefreshError;

/// Poll loop state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// No tick has completed yet.
    Pending,
    /// The last tick refreshed successfully.
    Healthy,
    /// The last tick failed transiently; the schedule continues.
    Degraded { reason: String },
    /// Credentials were rejected; polling is halted until the entry is
    /// re-authenticated and a new poller is started.
    AuthExpired { account: String },
    /// The poller was stopped.
    Stopped,
}

/// Drives a [`Coordinator`] on its configured cadence.
pub struct Poller {
    coordinator: Arc<Coordinator>,
    state: watch::Sender<PollState>,
    last_success: watch::Sender<Option<DateTime<Utc>>>,
    cancel: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Poller {
    /// Create a poller. Does not start ticking -- call
    /// [`start()`](Self::start).
    pub fn new(coordinator: Arc<Coordinator>) -> Self {
        let (state, _) = watch::channel(PollState::Pending);
        let (last_success, _) = watch::channel(None);
        Self {
            coordinator,
            state,
            last_success,
            cancel: CancellationToken::new(),
            handle: Mutex::new(None),
        }
    }

    /// Spawn the poll task. The first refresh happens immediately; later
    /// ones follow the coordinator's interval. Calling `start` on an
    /// already-started poller is a no-op.
    pub async fn start(&self) {
        let mut handle = self.handle.lock().await;
        if handle.is_some() {
            return;
        }
        *handle = Some(tokio::spawn(poll_task(
            Arc::clone(&self.coordinator),
            self.state.clone(),
            self.last_success.clone(),
            self.cancel.clone(),
        )));
        debug!(
            entry_id = self.coordinator.entry_id(),
            interval_secs = self.coordinator.update_interval().as_secs(),
            "polling started"
        );
    }

    /// Cancel the poll task and wait for it to finish.
    ///
    /// No in-flight state needs cleanup beyond what the session object
    /// manages itself; nothing is buffered across ticks.
    pub async fn stop(&self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.lock().await.take() {
            let _ = handle.await;
        }
    }

    /// Subscribe to poll state changes.
    pub fn state(&self) -> watch::Receiver<PollState> {
        self.state.subscribe()
    }

    /// Subscribe to the timestamp of the last successful refresh.
    pub fn last_success(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.last_success.subscribe()
    }
}

/// Tick loop: one `refresh()` per interval until cancelled or the
/// credentials expire.
async fn poll_task(
    coordinator: Arc<Coordinator>,
    state: watch::Sender<PollState>,
    last_success: watch::Sender<Option<DateTime<Utc>>>,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(coordinator.update_interval());

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                state.send_replace(PollState::Stopped);
                break;
            }
            _ = interval.tick() => {
                match coordinator.refresh().await {
                    Ok(()) => {
                        last_success.send_replace(Some(Utc::now()));
                        state.send_replace(PollState::Healthy);
                        debug!(entry_id = coordinator.entry_id(), "refresh complete");
                    }
                    Err(RefreshError::AuthRequired { account, source }) => {
                        error!(
                            error = %source,
                            %account,
                            "authentication rejected -- polling halted until reconfiguration"
                        );
                        state.send_replace(PollState::AuthExpired { account });
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, "refresh failed; retrying on next tick");
                        state.send_replace(PollState::Degraded {
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }
    }
}
