//! # Configuration Read Model
//!
//! Readers never see a half-edited settings object. [`SharedConfig`] keeps
//! the current version behind an `Arc`; a reader clones the `Arc` once per
//! refresh cycle or frame and works on that immutable copy. Writers build
//! a new version and swap it in. Writers serialize on their own mutex and
//! build the new version outside the reader lock, so a reader waits at most
//! for one pointer swap.
//!
//! ```text
//!   Settings UI ── update(|cfg| ..) ──> [ RwLock<Arc<Configuration>> ] ──> ConfigStore::save
//!                                              │
//!                      Refresh worker ─────────┤ current()  (Arc clone)
//!                      Draw callback  ─────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::config::Configuration;
use crate::error::{RadarError, RadarResult};

/// Persistence collaborator for the settings object.
pub trait ConfigStore: Send + Sync {
    /// Loads the stored configuration, or `None` if nothing is stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data exists but cannot be read or parsed.
    fn load(&self) -> RadarResult<Option<Configuration>>;

    /// Persists a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    fn save(&self, config: &Configuration) -> RadarResult<()>;
}

/// Single TOML file on disk.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    /// Store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for TomlFileStore {
    fn load(&self) -> RadarResult<Option<Configuration>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let config = toml::from_str(&text).map_err(|e| RadarError::Config(e.to_string()))?;
        Ok(Some(config))
    }

    fn save(&self, config: &Configuration) -> RadarResult<()> {
        let text = toml::to_string_pretty(config).map_err(|e| RadarError::Config(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Write-then-rename so a crash never leaves a truncated file.
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store. Counts saves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<Configuration>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `config`.
    #[must_use]
    pub fn with(config: Configuration) -> Self {
        Self { saved: Mutex::new(Some(config)), saves: AtomicUsize::new(0) }
    }

    /// Number of `save` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Acquire)
    }

    /// Last saved configuration.
    #[must_use]
    pub fn last_saved(&self) -> Option<Configuration> {
        self.saved.lock().clone()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> RadarResult<Option<Configuration>> {
        Ok(self.saved.lock().clone())
    }

    fn save(&self, config: &Configuration) -> RadarResult<()> {
        *self.saved.lock() = Some(config.clone());
        self.saves.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}

/// Versioned, shareable configuration.
pub struct SharedConfig {
    current: RwLock<Arc<Configuration>>,
    // Held across clone, edit, swap and save; never taken by readers
    writer: Mutex<()>,
    version: AtomicU64,
    store: Arc<dyn ConfigStore>,
}

impl std::fmt::Debug for SharedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedConfig")
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}

impl SharedConfig {
    /// Loads from `store`, falling back to defaults when nothing is stored.
    ///
    /// # Errors
    ///
    /// Propagates store read and parse errors.
    pub fn load(store: Arc<dyn ConfigStore>) -> RadarResult<Self> {
        let config = match store.load()? {
            Some(config) => config,
            None => {
                info!("No stored configuration, using defaults");
                Configuration::default()
            }
        };
        Ok(Self::with_store(config, store))
    }

    /// Wraps an existing configuration.
    #[must_use]
    pub fn with_store(config: Configuration, store: Arc<dyn ConfigStore>) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
            writer: Mutex::new(()),
            version: AtomicU64::new(0),
            store,
        }
    }

    /// In-memory configuration with no persistence beyond the process.
    #[must_use]
    pub fn in_memory(config: Configuration) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// The current immutable version.
    #[must_use]
    pub fn current(&self) -> Arc<Configuration> {
        Arc::clone(&self.current.read())
    }

    /// Monotonic version counter; bumps on every update.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Copies the current version, applies `edit`, publishes the result and saves it.
    ///
    /// Returns the new version number.
    ///
    /// # Errors
    ///
    /// Returns the store's error if saving fails. The new version is
    /// published either way.
    pub fn update<F>(&self, edit: F) -> RadarResult<u64>
    where
        F: FnOnce(&mut Configuration),
    {
        let _writer = self.writer.lock();

        let mut next = Configuration::clone(&self.current());
        edit(&mut next);
        let next = Arc::new(next);

        let previous = std::mem::replace(&mut *self.current.write(), Arc::clone(&next));
        drop(previous);
        let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;

        debug!(version, "Configuration updated");
        self.store.save(&next)?;
        Ok(version)
    }

    /// Adds a data-id to the user block-list.
    ///
    /// Returns `false` without saving when the id is `0` or already blocked.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub fn block_data_id(&self, data_id: u32) -> RadarResult<bool> {
        if data_id == 0 || self.current().is_user_blocked(data_id) {
            return Ok(false);
        }
        self.update(|cfg| {
            cfg.data_id_ignore_list.insert(data_id);
        })?;
        Ok(true)
    }

    /// Removes a data-id from the user block-list.
    ///
    /// Returns `false` without saving when the id was not blocked.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub fn unblock_data_id(&self, data_id: u32) -> RadarResult<bool> {
        if !self.current().is_user_blocked(data_id) {
            return Ok(false);
        }
        self.update(|cfg| {
            cfg.data_id_ignore_list.remove(&data_id);
        })?;
        Ok(true)
    }
}
