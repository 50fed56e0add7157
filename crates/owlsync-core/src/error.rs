// ── Coordinator error types ──
//
// The host scheduler understands exactly two failure signals: the
// credentials need user attention, or the tick failed and the next one
// should simply retry. Classification happens once, at the vendor
// session boundary; anything outside the designed error surface is a
// panic and propagates untouched.

use thiserror::Error;

/// Failure signal raised by a poll tick.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Stored credentials are no longer valid for the configured account.
    /// Automatic polling stops until the user re-authenticates through
    /// the host platform.
    #[error("Authentication failed for {account}")]
    AuthRequired {
        account: String,
        #[source]
        source: owlsync_api::Error,
    },

    /// Transient device or transport failure, wrapping the original
    /// error's message. Retried on the next scheduled tick.
    #[error("Update failed: {message}")]
    UpdateFailed { message: String },
}

impl RefreshError {
    /// Returns `true` if polling must halt until reconfiguration.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthRequired { .. })
    }
}
