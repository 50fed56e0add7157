//! Polling layer between `owlsync-api` and a host home-automation platform.
//!
//! This crate owns the glue that keeps one monitored device fresh:
//!
//! - **[`Coordinator`]** — Per-device refresh driver. Each
//!   [`refresh()`](Coordinator::refresh) call invokes the session's
//!   property update once, reconciles any rotated tokens into the config
//!   entry, and reclassifies vendor errors into the two failure signals
//!   the host scheduler understands. No retries, no backoff, no caching.
//!
//! - **[`Poller`]** — Scheduled tick loop realizing the host-scheduler
//!   contract: fixed cadence, serialized ticks, halt on auth failure,
//!   keep going on transient failure. Publishes [`PollState`] and the
//!   last-success timestamp through `watch` channels for subscribers.
//!
//! - **[`DeviceDescriptor`]** — Immutable identity record computed once at
//!   coordinator construction and handed to the host's device registry.
//!
//! - **[`ConfigEntryStore`]** — Seam over the host's durable config
//!   entry: snapshot + replace semantics, with the token merge itself a
//!   pure function ([`merged_data`]) so it is testable without storage.

pub mod coordinator;
pub mod descriptor;
pub mod error;
pub mod poller;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use coordinator::Coordinator;
pub use descriptor::DeviceDescriptor;
pub use error::RefreshError;
pub use poller::{PollState, Poller};
pub use store::{CONF_EMAIL, ConfigEntryStore, EntryData, StoreError, merged_data};

/// Integration namespace used in device registry identifiers.
pub const DOMAIN: &str = "owlet";

/// Manufacturer string shown by the device registry.
pub const MANUFACTURER: &str = "Owlet Baby Care";

/// Display name for the monitored sock device.
pub const DEVICE_NAME: &str = "Owlet Baby Care Sock";
