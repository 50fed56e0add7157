use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Rotated credentials reported by a refresh, keyed by token name
/// (e.g. `access_token`, `refresh_token`).
pub type TokenSet = BTreeMap<String, String>;

/// The result of one property refresh.
///
/// `properties` is passed through to the host entity layer untouched --
/// the coordinator itself only ever inspects `tokens`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyUpdate {
    /// Current device properties as reported by the vendor service.
    #[serde(default)]
    pub properties: Map<String, Value>,

    /// Tokens rotated during this refresh. Empty when the session's
    /// credentials did not change.
    #[serde(default)]
    pub tokens: TokenSet,
}

impl PropertyUpdate {
    /// Returns `true` if this update carries rotated tokens that must be
    /// persisted.
    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }
}
