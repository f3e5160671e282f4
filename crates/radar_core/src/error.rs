//! # Core Error Types
//!
//! Two families live here:
//!
//! - [`RadarError`]: setup and configuration failures. These surface to the
//!   host at start-up or when the settings UI saves.
//! - [`EntityFault`]: per-entity read failures during a refresh. These are
//!   never surfaced; the entity is skipped for that cycle.

use thiserror::Error;

/// Errors that can occur while starting the overlay or persisting settings.
#[derive(Error, Debug)]
pub enum RadarError {
    /// Configuration could not be parsed or serialized.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read or written.
    #[error("config store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The static lookup catalog could not be parsed.
    #[error("invalid lookup catalog: {0}")]
    Catalog(String),

    /// The background refresh worker could not be started.
    #[error("failed to spawn refresh worker: {0}")]
    WorkerSpawn(String),

    /// A refresh worker is already running for this overlay.
    #[error("refresh worker already running")]
    AlreadyRunning,
}

/// Result type for overlay setup operations.
pub type RadarResult<T> = Result<T, RadarError>;

/// A single entity could not be read during enumeration.
///
/// Recovered locally by skipping the entity for the current cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityFault {
    /// The object was despawned or its slot reused between enumeration and read.
    #[error("stale entity reference {object_id:#x}")]
    Stale {
        /// Object id of the stale reference.
        object_id: u64,
    },

    /// An attribute of the object could not be read.
    #[error("unreadable entity {object_id:#x}: {reason}")]
    Unreadable {
        /// Object id of the entity.
        object_id: u64,
        /// What could not be read.
        reason: String,
    },
}
