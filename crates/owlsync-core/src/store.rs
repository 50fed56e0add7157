// ── Config entry store seam ──
//
// The durable configuration record lives with the host platform; the
// coordinator only needs snapshot + replace semantics over one entry.
// The token merge is a pure function so it can be tested without a
// live store behind it.

use serde_json::{Map, Value};
use thiserror::Error;

use owlsync_api::TokenSet;

/// Key of the account identifier inside entry data.
pub const CONF_EMAIL: &str = "email";

/// One config entry's data: a string-keyed mapping.
pub type EntryData = Map<String, Value>;

/// Failure to persist a config entry.
#[derive(Debug, Error)]
#[error("failed to persist config entry: {message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Durable storage for a single config entry.
///
/// The coordinator is the sole internal writer of token fields, and
/// `replace` receives a fully merged mapping -- implementations never
/// patch individual fields.
pub trait ConfigEntryStore: Send + Sync {
    /// Stable identifier of the backing entry.
    fn entry_id(&self) -> &str;

    /// Snapshot of the entry's current data.
    fn data(&self) -> EntryData;

    /// Replace the entry's data with the supplied mapping and persist it.
    fn replace(&self, data: EntryData) -> Result<(), StoreError>;

    /// The account identifier stored in the entry, used in auth-failure
    /// diagnostics.
    fn account(&self) -> Option<String> {
        self.data()
            .get(CONF_EMAIL)
            .and_then(Value::as_str)
            .map(String::from)
    }
}

/// Union of prior entry data and rotated tokens.
///
/// New token keys override identically-named prior keys; all other prior
/// keys are retained.
pub fn merged_data(prior: &EntryData, tokens: &TokenSet) -> EntryData {
    let mut merged = prior.clone();
    for (name, value) in tokens {
        merged.insert(name.clone(), Value::String(value.clone()));
    }
    merged
}
