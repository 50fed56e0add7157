// ── Polling coordinator ──
//
// Drives one device session: each tick refreshes properties through the
// vendor client and reconciles rotated tokens into the config entry.
// Scheduling lives in `poller` -- the coordinator performs exactly one
// refresh attempt per call, no retries, no backoff.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use owlsync_api::DeviceSession;

use crate::descriptor::DeviceDescriptor;
use crate::error::RefreshError;
use crate::store::{ConfigEntryStore, merged_data};

/// Polls a device session on a fixed cadence and keeps persisted
/// credentials in sync.
///
/// Consumers read refreshed device state through the session object; the
/// coordinator buffers nothing across ticks.
pub struct Coordinator {
    session: Arc<dyn DeviceSession>,
    store: Arc<dyn ConfigEntryStore>,
    descriptor: DeviceDescriptor,
    interval: Duration,
}

impl Coordinator {
    /// Create a coordinator for an established session.
    ///
    /// The session's identity fields must already be resolved -- no
    /// network call happens here. `interval_secs` must be positive;
    /// changing the cadence means constructing a new coordinator.
    pub fn new(
        session: Arc<dyn DeviceSession>,
        store: Arc<dyn ConfigEntryStore>,
        interval_secs: u64,
    ) -> Self {
        let descriptor = DeviceDescriptor::from_session(session.as_ref());
        Self {
            session,
            store,
            descriptor,
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// The immutable device registry record captured at construction.
    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    /// The session this coordinator polls.
    pub fn session(&self) -> &Arc<dyn DeviceSession> {
        &self.session
    }

    /// The configured polling cadence.
    pub fn update_interval(&self) -> Duration {
        self.interval
    }

    /// Identifier of the config entry this coordinator writes tokens to.
    pub fn entry_id(&self) -> &str {
        self.store.entry_id()
    }

    /// Perform one refresh tick.
    ///
    /// On success, rotated tokens (if any) are merged into the persisted
    /// entry: new token keys override same-named keys, all other keys are
    /// preserved. Vendor errors are reclassified into the two signals the
    /// host scheduler understands:
    ///
    /// - [`RefreshError::AuthRequired`] -- credentials rejected; carries
    ///   the account identifier from the current entry data.
    /// - [`RefreshError::UpdateFailed`] -- any other known device or
    ///   transport failure, including a failed token persist.
    pub async fn refresh(&self) -> Result<(), RefreshError> {
        let update = match self.session.update_properties().await {
            Ok(update) => update,
            Err(err) if err.is_auth() => {
                let account = self
                    .store
                    .account()
                    .unwrap_or_else(|| "<unknown account>".into());
                return Err(RefreshError::AuthRequired {
                    account,
                    source: err,
                });
            }
            Err(err) => {
                return Err(RefreshError::UpdateFailed {
                    message: err.to_string(),
                });
            }
        };

        if update.has_tokens() {
            let merged = merged_data(&self.store.data(), &update.tokens);
            self.store
                .replace(merged)
                .map_err(|err| RefreshError::UpdateFailed {
                    message: err.to_string(),
                })?;
            debug!(
                entry_id = self.store.entry_id(),
                rotated = update.tokens.len(),
                "persisted rotated tokens"
            );
        }

        Ok(())
    }
}
