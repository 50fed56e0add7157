//! Durable configuration for owlsync.
//!
//! TOML-backed config entries (one per paired device account), defaults,
//! and entry handles implementing `owlsync_core::ConfigEntryStore`. The
//! coordinator writes rotated tokens through a handle; everything else
//! in the file is preserved on every write.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use owlsync_core::{ConfigEntryStore, EntryData, StoreError};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown config entry '{entry_id}'")]
    UnknownEntry { entry_id: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Config entries keyed by entry id. Entry data is a string-keyed
    /// mapping: account email, tokens, anything the pairing flow stored.
    #[serde(default)]
    pub entries: HashMap<String, EntryData>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Polling cadence in seconds for new coordinators.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    10
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "owlsync", "owlsync").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("owlsync");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load a [`Config`] from a specific file + environment overrides.
///
/// A missing file yields the defaults, so first-run works without any
/// setup step.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("OWLSYNC_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load the config from the canonical path.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

// ── Entry file ──────────────────────────────────────────────────────

/// File-backed store of config entries.
///
/// Holds the parsed config in memory behind an `RwLock`; every write
/// through an [`EntryHandle`] rewrites the whole file, so sibling
/// entries and defaults are never lost.
pub struct EntryFile {
    path: PathBuf,
    config: RwLock<Config>,
}

impl EntryFile {
    /// Load entries from `path`, applying defaults when the file is
    /// absent.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = load_config_from(&path)?;
        Ok(Self {
            path,
            config: RwLock::new(config),
        })
    }

    /// Default polling cadence for coordinators built from this file.
    pub fn poll_interval(&self) -> u64 {
        self.read().defaults.poll_interval
    }

    /// Ids of all entries currently present.
    pub fn entry_ids(&self) -> Vec<String> {
        self.read().entries.keys().cloned().collect()
    }

    /// Create a new entry and persist it. Returns the generated entry id.
    pub fn create_entry(&self, data: EntryData) -> Result<String, ConfigError> {
        let entry_id = Uuid::new_v4().simple().to_string();
        self.write().entries.insert(entry_id.clone(), data);
        self.save()?;
        Ok(entry_id)
    }

    /// Remove an entry and persist the change.
    pub fn remove_entry(&self, entry_id: &str) -> Result<(), ConfigError> {
        if self.write().entries.remove(entry_id).is_none() {
            return Err(ConfigError::UnknownEntry {
                entry_id: entry_id.into(),
            });
        }
        self.save()
    }

    /// A store handle scoped to one entry.
    pub fn handle(self: &Arc<Self>, entry_id: &str) -> Result<EntryHandle, ConfigError> {
        if !self.read().entries.contains_key(entry_id) {
            return Err(ConfigError::UnknownEntry {
                entry_id: entry_id.into(),
            });
        }
        Ok(EntryHandle {
            file: Arc::clone(self),
            entry_id: entry_id.to_owned(),
        })
    }

    /// Serialize to pretty TOML and write to the backing path.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(&*self.read())?;
        std::fs::write(&self.path, toml_str)?;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Config> {
        self.config.read().expect("config lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Config> {
        self.config.write().expect("config lock poisoned")
    }
}

// ── Entry handle ────────────────────────────────────────────────────

/// Store handle scoped to a single config entry.
#[derive(Clone)]
pub struct EntryHandle {
    file: Arc<EntryFile>,
    entry_id: String,
}

impl ConfigEntryStore for EntryHandle {
    fn entry_id(&self) -> &str {
        &self.entry_id
    }

    fn data(&self) -> EntryData {
        self.file
            .read()
            .entries
            .get(&self.entry_id)
            .cloned()
            .unwrap_or_default()
    }

    fn replace(&self, data: EntryData) -> Result<(), StoreError> {
        self.file
            .write()
            .entries
            .insert(self.entry_id.clone(), data);
        self.file
            .save()
            .map_err(|err| StoreError::new(err.to_string()))
    }
}

// ── Tests ───────────────────────────────────────────────────────────
