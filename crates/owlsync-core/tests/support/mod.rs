// Shared test doubles: a scriptable vendor session and an in-memory
// config entry store.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use serde_json::json;

use owlsync_api::{DeviceSession, Error, PropertyUpdate, TokenSet};
use owlsync_core::{ConfigEntryStore, EntryData, StoreError};

pub const SERIAL: &str = "AC1234567890";
pub const MODEL: &str = "Smart Sock 3";
pub const SW_VERSION: &str = "3.10.5";
pub const HW_VERSION: &str = "OWL3";

// ── Builders ────────────────────────────────────────────────────────

pub fn entry(pairs: &[(&str, &str)]) -> EntryData {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), json!(v)))
        .collect()
}

pub fn tokens(pairs: &[(&str, &str)]) -> TokenSet {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

pub fn update_with_tokens(pairs: &[(&str, &str)]) -> PropertyUpdate {
    PropertyUpdate {
        properties: serde_json::Map::new(),
        tokens: tokens(pairs),
    }
}

// ── Scripted session ────────────────────────────────────────────────

/// Pops one queued response per `update_properties` call, returning an
/// empty successful update once the script runs dry.
pub struct ScriptedSession {
    responses: Mutex<VecDeque<Result<PropertyUpdate, Error>>>,
    calls: AtomicUsize,
}

impl ScriptedSession {
    pub fn new(responses: Vec<Result<PropertyUpdate, Error>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeviceSession for ScriptedSession {
    fn serial(&self) -> &str {
        SERIAL
    }

    fn model(&self) -> &str {
        MODEL
    }

    fn software_version(&self) -> &str {
        SW_VERSION
    }

    fn hardware_version(&self) -> &str {
        HW_VERSION
    }

    async fn update_properties(&self) -> Result<PropertyUpdate, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(PropertyUpdate::default()))
    }
}

// ── Drifting session ────────────────────────────────────────────────

/// Session whose reported identity changes after `drift()` is called.
/// Used to check that descriptors are captured at construction time.
pub struct DriftingSession {
    drifted: AtomicBool,
}

impl DriftingSession {
    pub fn new() -> Self {
        Self {
            drifted: AtomicBool::new(false),
        }
    }

    pub fn drift(&self) {
        self.drifted.store(true, Ordering::SeqCst);
    }

    fn pick<'a>(&self, before: &'a str, after: &'a str) -> &'a str {
        if self.drifted.load(Ordering::SeqCst) {
            after
        } else {
            before
        }
    }
}

#[async_trait]
impl DeviceSession for DriftingSession {
    fn serial(&self) -> &str {
        self.pick(SERIAL, "AC0000000000")
    }

    fn model(&self) -> &str {
        self.pick(MODEL, "Smart Sock 4")
    }

    fn software_version(&self) -> &str {
        self.pick(SW_VERSION, "4.0.1")
    }

    fn hardware_version(&self) -> &str {
        self.pick(HW_VERSION, "OWL4")
    }

    async fn update_properties(&self) -> Result<PropertyUpdate, Error> {
        Ok(PropertyUpdate::default())
    }
}

// ── In-memory entry store ───────────────────────────────────────────

/// Entry store backed by an `RwLock`, recording how many writes landed.
pub struct MemoryStore {
    entry_id: String,
    data: RwLock<EntryData>,
    writes: AtomicUsize,
    fail_replace: AtomicBool,
}

impl MemoryStore {
    pub fn new(data: EntryData) -> Self {
        Self {
            entry_id: "entry-1".into(),
            data: RwLock::new(data),
            writes: AtomicUsize::new(0),
            fail_replace: AtomicBool::new(false),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make the next `replace` call fail, as a persistence outage would.
    pub fn fail_next_replace(&self) {
        self.fail_replace.store(true, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> EntryData {
        self.data.read().unwrap().clone()
    }
}

impl ConfigEntryStore for MemoryStore {
    fn entry_id(&self) -> &str {
        &self.entry_id
    }

    fn data(&self) -> EntryData {
        self.snapshot()
    }

    fn replace(&self, data: EntryData) -> Result<(), StoreError> {
        if self.fail_replace.swap(false, Ordering::SeqCst) {
            return Err(StoreError::new("disk full"));
        }
        *self.data.write().unwrap() = data;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
