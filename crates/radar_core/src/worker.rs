//! # Background Refresh Worker
//!
//! A single named thread runs [`Refresher::refresh_once`] on a fixed
//! cadence. The control channel doubles as the sleep: `recv_timeout`
//! wakes early for a refresh request or shutdown.
//!
//! ```text
//!   ┌──────────────┐   RefreshNow / Shutdown   ┌──────────────────────┐
//!   │ RefreshWorker│ ────────────────────────> │ radar-refresh thread │
//!   │  (owner)     │ <──────── exited ──────── │  refresh, wait, ...  │
//!   └──────────────┘                           └──────────────────────┘
//! ```

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, info, warn};

use crate::error::{RadarError, RadarResult};
use crate::refresh::Refresher;

enum Command {
    RefreshNow,
    Shutdown,
}

/// Cloneable handle that wakes the worker for an immediate cycle.
#[derive(Clone, Debug)]
pub struct RefreshTrigger {
    control: Sender<Command>,
}

impl RefreshTrigger {
    /// Requests a cycle. Returns `false` once the worker has exited.
    pub fn request(&self) -> bool {
        self.control.send(Command::RefreshNow).is_ok()
    }
}

/// Owner handle of the background refresh thread.
pub struct RefreshWorker {
    control: Sender<Command>,
    exited: Receiver<()>,
    handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for RefreshWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshWorker").field("running", &self.handle.is_some()).finish()
    }
}

impl RefreshWorker {
    /// Starts the worker. The first cycle runs immediately.
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::WorkerSpawn`] if the thread cannot be created.
    pub fn spawn(refresher: Refresher, interval: Duration) -> RadarResult<Self> {
        let (control, commands) = unbounded();
        let (exited_tx, exited) = bounded(1);

        let handle = thread::Builder::new()
            .name("radar-refresh".into())
            .spawn(move || {
                run(&refresher, &commands, interval);
                let _ = exited_tx.send(());
            })
            .map_err(|e| RadarError::WorkerSpawn(e.to_string()))?;

        info!(interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX), "Refresh worker started");
        Ok(Self { control, exited, handle: Some(handle) })
    }

    /// Wakes the worker for an immediate cycle.
    pub fn request_refresh(&self) {
        let _ = self.control.send(Command::RefreshNow);
    }

    /// Handle for requesting cycles from other threads.
    #[must_use]
    pub fn trigger(&self) -> RefreshTrigger {
        RefreshTrigger { control: self.control.clone() }
    }

    /// `true` until [`RefreshWorker::shutdown`] has run.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stops the worker, waiting at most `timeout` for the current cycle.
    ///
    /// Returns `true` if the thread was joined. On timeout the thread is
    /// detached; it exits on its own after the cycle in progress.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        let Some(handle) = self.handle.take() else {
            return true;
        };
        let _ = self.control.send(Command::Shutdown);

        match self.exited.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                let _ = handle.join();
                info!("Refresh worker stopped");
                true
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX), "Refresh worker did not stop in time, detaching");
                false
            }
        }
    }
}

impl Drop for RefreshWorker {
    fn drop(&mut self) {
        self.shutdown(radar_shared::constants::WORKER_JOIN_TIMEOUT);
    }
}

fn run(refresher: &Refresher, commands: &Receiver<Command>, interval: Duration) {
    loop {
        refresher.refresh_once();
        match commands.recv_timeout(interval) {
            Ok(Command::RefreshNow) | Err(RecvTimeoutError::Timeout) => {}
            Ok(Command::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("Refresh loop exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Configuration;
    use crate::entity::{BattleNpcSubKind, Entity, ObjectKind};
    use crate::snapshot::Snapshot;
    use crate::store::SharedConfig;
    use crate::testing::{ScriptedZoneOracle, StaticEntitySource};
    use std::sync::Arc;
    use std::time::Instant;

    fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    fn refresher(source: Arc<StaticEntitySource>) -> Refresher {
        Refresher::new(
            source,
            Arc::new(ScriptedZoneOracle::in_town()),
            Arc::new(SharedConfig::in_memory(Configuration::default())),
            Arc::new(Catalog::default()),
            Arc::new(Snapshot::new()),
        )
    }

    #[test]
    fn test_worker_refreshes_and_stops() {
        let source = Arc::new(StaticEntitySource::new());
        source.set(vec![Ok(Entity::new(1, ObjectKind::BattleNpc, "Goblin")
            .with_sub_kind(BattleNpcSubKind::Enemy))]);
        let refresher = refresher(source.clone());
        let snapshot = Arc::clone(refresher.snapshot());

        // Long interval: only the initial cycle and explicit requests run
        let mut worker = RefreshWorker::spawn(refresher, Duration::from_secs(60)).unwrap();
        assert!(wait_for(|| snapshot.len() == 1));

        source.set(Vec::new());
        worker.request_refresh();
        assert!(wait_for(|| snapshot.is_empty()));

        let trigger = worker.trigger();
        source.set(vec![Ok(Entity::new(2, ObjectKind::BattleNpc, "Orc")
            .with_sub_kind(BattleNpcSubKind::Enemy))]);
        assert!(trigger.request());
        assert!(wait_for(|| snapshot.len() == 1));

        assert!(worker.shutdown(Duration::from_secs(3)));
        assert!(!worker.is_running());
        assert!(!trigger.request());
        // Second shutdown is a no-op
        assert!(worker.shutdown(Duration::from_millis(1)));
    }

    #[test]
    fn test_shutdown_is_prompt() {
        let refresher = refresher(Arc::new(StaticEntitySource::new()));
        let mut worker = RefreshWorker::spawn(refresher, Duration::from_secs(60)).unwrap();
        let start = Instant::now();
        assert!(worker.shutdown(Duration::from_secs(3)));
        assert!(start.elapsed() < Duration::from_secs(3));
    }
}
