//! Render pass statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated from the draw callback.
#[derive(Debug, Default)]
pub struct FrameStats {
    frames_drawn: AtomicU64,
    frames_skipped: AtomicU64,
    entities_last_frame: AtomicU64,
}

/// Point-in-time copy of [`FrameStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames that iterated the snapshot.
    pub frames_drawn: u64,
    /// Frames skipped because the snapshot lock was busy.
    pub frames_skipped: u64,
    /// Entities drawn in the most recent drawn frame.
    pub entities_last_frame: u64,
}

impl RenderStats {
    /// Fraction of frames skipped, `0..=1`.
    #[must_use]
    pub fn skip_ratio(&self) -> f64 {
        let total = self.frames_drawn + self.frames_skipped;
        if total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let ratio = self.frames_skipped as f64 / total as f64;
            ratio
        }
    }
}

impl FrameStats {
    pub(crate) fn record_drawn(&self, entities: usize) {
        self.frames_drawn.fetch_add(1, Ordering::Relaxed);
        self.entities_last_frame
            .store(u64::try_from(entities).unwrap_or(u64::MAX), Ordering::Relaxed);
    }

    pub(crate) fn record_skipped(&self) {
        self.frames_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Copies the counters.
    #[must_use]
    pub fn snapshot(&self) -> RenderStats {
        RenderStats {
            frames_drawn: self.frames_drawn.load(Ordering::Relaxed),
            frames_skipped: self.frames_skipped.load(Ordering::Relaxed),
            entities_last_frame: self.entities_last_frame.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_ratio() {
        let stats = FrameStats::default();
        assert_eq!(stats.snapshot().skip_ratio(), 0.0);
        stats.record_drawn(4);
        stats.record_drawn(7);
        stats.record_drawn(2);
        stats.record_skipped();
        let s = stats.snapshot();
        assert_eq!(s.frames_drawn, 3);
        assert_eq!(s.entities_last_frame, 2);
        assert!((s.skip_ratio() - 0.25).abs() < 1e-9);
    }
}
