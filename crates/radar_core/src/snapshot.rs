//! # Published Snapshot
//!
//! The render-ready list handed from the refresh worker to the draw callback.
//!
//! ```text
//!   Refresh worker                          Draw callback
//!   ──────────────                          ─────────────
//!   build Vec locally (no lock)
//!   publish():  lock ─ swap ─ unlock  ───>  try_read(): try_lock or skip frame
//!   drop old Vec outside the lock           iterate + draw, unlock
//! ```
//!
//! A reader holds the lock for its whole pass, so it always sees one
//! complete list: the one before a publish or the one after it.
//!
//! [`Snapshot::clear`] bumps an epoch under the same lock. A list built
//! against an older epoch is dropped by [`Snapshot::publish_at`], so a
//! cycle that was already running when the zone changed cannot bring
//! the old zone back.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, MutexGuard};
use radar_shared::Rgba;

use crate::config::{EspOption, RuleRef};
use crate::entity::Entity;

/// One render-ready entity.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotEntry {
    /// Entity data copied at refresh time.
    pub entity: Entity,
    /// Resolved rule with the final color applied.
    pub rule: EspOption,
    /// Rule that was selected.
    pub rule_ref: RuleRef,
    /// Display label.
    pub label: String,
}

impl SnapshotEntry {
    /// Final marker color.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.rule.color
    }
}

/// Mutex-guarded list plus a publish counter.
#[derive(Debug, Default)]
pub struct Snapshot {
    entries: Mutex<Vec<SnapshotEntry>>,
    generation: AtomicU64,
    // Written only while `entries` is locked
    epoch: AtomicU64,
}

/// Read access held for a render pass.
pub struct SnapshotRead<'a> {
    guard: MutexGuard<'a, Vec<SnapshotEntry>>,
}

impl std::ops::Deref for SnapshotRead<'_> {
    type Target = [SnapshotEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl Snapshot {
    /// Empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the published list. Returns the new generation.
    ///
    /// The lock is held only for the swap.
    pub fn publish(&self, entries: Vec<SnapshotEntry>) -> u64 {
        let previous = {
            let mut guard = self.entries.lock();
            std::mem::replace(&mut *guard, entries)
        };
        drop(previous);
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Publishes only if no clear happened since `epoch` was read.
    ///
    /// Returns the new generation, or `None` if the list was stale.
    pub fn publish_at(&self, epoch: u64, entries: Vec<SnapshotEntry>) -> Option<u64> {
        let previous = {
            let mut guard = self.entries.lock();
            if self.epoch.load(Ordering::Acquire) != epoch {
                None
            } else {
                Some(std::mem::replace(&mut *guard, entries))
            }
        };
        let previous = previous?;
        drop(previous);
        Some(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Empties the published list synchronously and starts a new epoch.
    pub fn clear(&self) {
        let previous = {
            let mut guard = self.entries.lock();
            self.epoch.fetch_add(1, Ordering::AcqRel);
            std::mem::take(&mut *guard)
        };
        drop(previous);
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Current clear epoch. Read it before building a list.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Non-blocking read; `None` when the writer holds the lock.
    #[must_use]
    pub fn try_read(&self) -> Option<SnapshotRead<'_>> {
        self.entries.try_lock().map(|guard| SnapshotRead { guard })
    }

    /// Blocking read. Not for the draw callback.
    #[must_use]
    pub fn read(&self) -> SnapshotRead<'_> {
        SnapshotRead { guard: self.entries.lock() }
    }

    /// Number of published entries (blocking).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// `true` when nothing is published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count of publishes and clears so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KindRule;
    use crate::entity::ObjectKind;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::thread;

    fn entries(n: usize) -> Vec<SnapshotEntry> {
        (0..n)
            .map(|i| SnapshotEntry {
                entity: Entity::new(i as u64, ObjectKind::BattleNpc, format!("mob {i}")),
                rule: EspOption::default(),
                rule_ref: RuleRef::Kind(KindRule::Npc),
                label: format!("mob {i}"),
            })
            .collect()
    }

    #[test]
    fn test_publish_and_clear() {
        let snapshot = Snapshot::new();
        assert!(snapshot.is_empty());

        assert_eq!(snapshot.publish(entries(3)), 1);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.read()[2].label, "mob 2");

        snapshot.clear();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.generation(), 2);
    }

    #[test]
    fn test_stale_epoch_publish_dropped() {
        let snapshot = Snapshot::new();
        let epoch = snapshot.epoch();
        assert_eq!(snapshot.publish_at(epoch, entries(2)), Some(1));

        let before_clear = snapshot.epoch();
        snapshot.clear();
        assert_eq!(snapshot.publish_at(before_clear, entries(4)), None);
        assert!(snapshot.is_empty());

        assert_eq!(snapshot.publish_at(snapshot.epoch(), entries(1)), Some(3));
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_try_read_fails_while_locked() {
        let snapshot = Snapshot::new();
        snapshot.publish(entries(1));

        let held = snapshot.read();
        assert!(snapshot.try_read().is_none());
        drop(held);
        assert_eq!(snapshot.try_read().map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_concurrent_readers_see_whole_lists() {
        let snapshot = Arc::new(Snapshot::new());
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let snapshot = Arc::clone(&snapshot);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                for round in 0..500 {
                    let n = if round % 2 == 0 { 10 } else { 25 };
                    snapshot.publish(entries(n));
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        let mut observed = 0;
        while !done.load(Ordering::SeqCst) {
            if let Some(read) = snapshot.try_read() {
                assert!(matches!(read.len(), 0 | 10 | 25), "partial list of {}", read.len());
                // Every entry of one list belongs to the same build
                for (i, e) in read.iter().enumerate() {
                    assert_eq!(e.entity.object_id, i as u64);
                }
                observed += 1;
            }
        }
        writer.join().unwrap();
        assert!(observed > 0 || snapshot.len() == 25);
    }
}
