//! # Refresh Loop
//!
//! One cycle: check the suppression guard, enumerate once, resolve every
//! entity into a local list, publish. Faulted entities are skipped.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::config::Configuration;
use crate::resolver::Resolver;
use crate::snapshot::{Snapshot, SnapshotEntry};
use crate::source::{EntitySource, ZoneContext, ZoneOracle};
use crate::store::SharedConfig;

/// Why a cycle or frame was suppressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SuppressReason {
    /// Global enable is off.
    Disabled,
    /// Zone transition in progress.
    BetweenAreas,
    /// Logging out.
    LoggingOut,
    /// No local player.
    NoLocalPlayer,
}

/// Guard shared by the refresh loop and the draw callback.
///
/// When it trips the snapshot is left as it is.
#[must_use]
pub fn should_suppress(oracle: &dyn ZoneOracle, config: &Configuration) -> Option<SuppressReason> {
    if !config.enabled {
        Some(SuppressReason::Disabled)
    } else if oracle.is_between_areas() {
        Some(SuppressReason::BetweenAreas)
    } else if oracle.is_logging_out() {
        Some(SuppressReason::LoggingOut)
    } else if oracle.local_player().is_none() {
        Some(SuppressReason::NoLocalPlayer)
    } else {
        None
    }
}

/// Result of one refresh cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Guard tripped; previous snapshot untouched.
    Suppressed(SuppressReason),
    /// New list published.
    Published {
        /// Entries in the new list.
        published: usize,
        /// Entities that faulted during enumeration.
        skipped: usize,
        /// Snapshot generation after publishing.
        generation: u64,
    },
    /// The snapshot was cleared mid-cycle; the list was dropped.
    Discarded,
}

/// Everything one refresh cycle reads and writes.
#[derive(Clone)]
pub struct Refresher {
    source: Arc<dyn EntitySource>,
    oracle: Arc<dyn ZoneOracle>,
    config: Arc<SharedConfig>,
    catalog: Arc<Catalog>,
    snapshot: Arc<Snapshot>,
}

impl Refresher {
    /// Wires a refresher.
    #[must_use]
    pub fn new(
        source: Arc<dyn EntitySource>,
        oracle: Arc<dyn ZoneOracle>,
        config: Arc<SharedConfig>,
        catalog: Arc<Catalog>,
        snapshot: Arc<Snapshot>,
    ) -> Self {
        Self { source, oracle, config, catalog, snapshot }
    }

    /// The snapshot this refresher publishes to.
    #[must_use]
    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    /// Runs one cycle.
    pub fn refresh_once(&self) -> RefreshOutcome {
        // Read before anything else so a clear at any point in the cycle wins
        let epoch = self.snapshot.epoch();
        let config = self.config.current();
        if let Some(reason) = should_suppress(self.oracle.as_ref(), &config) {
            trace!(?reason, "Refresh suppressed");
            return RefreshOutcome::Suppressed(reason);
        }

        let start = Instant::now();
        let ctx = ZoneContext::capture(self.oracle.as_ref(), &self.catalog);
        let resolver = Resolver::new(&config, &self.catalog, &ctx);

        let batch = self.source.enumerate();
        let mut entries = Vec::with_capacity(batch.len());
        let mut skipped = 0;
        for item in batch {
            let entity = match item {
                Ok(entity) => entity,
                Err(fault) => {
                    debug!(%fault, "Skipping entity");
                    skipped += 1;
                    continue;
                }
            };
            let resolution = resolver.resolve(&entity);
            if resolution.is_displayed() {
                entries.push(SnapshotEntry {
                    entity,
                    rule: resolution.rule,
                    rule_ref: resolution.rule_ref,
                    label: resolution.label,
                });
            }
        }

        let published = entries.len();
        let Some(generation) = self.snapshot.publish_at(epoch, entries) else {
            debug!(epoch, "Snapshot cleared during refresh, dropping list");
            return RefreshOutcome::Discarded;
        };
        debug!(
            published,
            skipped,
            generation,
            special_zone = ctx.is_special_zone,
            elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
            "Snapshot published"
        );
        RefreshOutcome::Published { published, skipped, generation }
    }
}
