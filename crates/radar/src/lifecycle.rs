//! # Lifecycle Controller
//!
//! ```text
//! start():     snapshot ─> spawn worker ─> subscribe listener
//! shutdown():  unsubscribe ─> stop worker (bounded join) ─> clear snapshot
//! ```
//!
//! Territory, login and logout events clear the snapshot on the calling
//! thread before returning, then wake the worker so the new zone is
//! scanned without waiting a full interval.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use radar_core::{
    should_suppress, Catalog, EntitySource, RadarError, RadarResult, RefreshTrigger, RefreshWorker, Refresher,
    SharedConfig, Snapshot, ZoneOracle,
};
use radar_render::{DrawList, FrameInput, FrameOutcome, Projector, RenderPass, RenderStats};
use radar_shared::constants::{REFRESH_INTERVAL, WORKER_JOIN_TIMEOUT};
use tracing::{debug, info, trace, warn};

use crate::host::{HostListener, PluginHost, SubscriptionId};

/// External collaborators the overlay runs against.
#[derive(Clone)]
pub struct RadarServices {
    /// Entity enumeration.
    pub source: Arc<dyn EntitySource>,
    /// Zone and session state.
    pub oracle: Arc<dyn ZoneOracle>,
    /// Versioned configuration.
    pub config: Arc<SharedConfig>,
    /// Static lookup tables.
    pub catalog: Arc<Catalog>,
    /// Event registration.
    pub host: Arc<dyn PluginHost>,
}

/// The listener registered with the host.
struct Overlay {
    snapshot: Arc<Snapshot>,
    oracle: Arc<dyn ZoneOracle>,
    config: Arc<SharedConfig>,
    pass: RenderPass,
    trigger: Mutex<Option<RefreshTrigger>>,
}

impl Overlay {
    fn draw(&self, draw: &mut dyn DrawList, projector: &dyn Projector) -> Option<FrameOutcome> {
        let config = self.config.current();
        if let Some(reason) = should_suppress(self.oracle.as_ref(), &config) {
            trace!(?reason, "Draw suppressed");
            return None;
        }
        let input = FrameInput {
            projector,
            local_position: self.oracle.local_player().map(|p| p.position),
        };
        Some(self.pass.render(&self.snapshot, &config, &input, draw))
    }

    fn reset(&self, event: &'static str) {
        self.snapshot.clear();
        debug!(event, "Snapshot cleared");
        if let Some(trigger) = self.trigger.lock().as_ref() {
            trigger.request();
        }
    }
}

impl HostListener for Overlay {
    fn on_draw(&self, draw: &mut dyn DrawList, projector: &dyn Projector) {
        self.draw(draw, projector);
    }

    fn on_territory_changed(&self, territory_id: u16) {
        debug!(territory_id, "Territory changed");
        self.reset("territory_changed");
    }

    fn on_login(&self) {
        self.reset("login");
    }

    fn on_logout(&self) {
        self.reset("logout");
    }
}

struct Running {
    subscription: SubscriptionId,
    worker: RefreshWorker,
}

/// The overlay plugin instance.
pub struct Radar {
    services: RadarServices,
    overlay: Arc<Overlay>,
    interval: Duration,
    running: Option<Running>,
}

impl std::fmt::Debug for Radar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Radar")
            .field("running", &self.running.is_some())
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl Radar {
    /// Stopped instance with the default refresh interval.
    #[must_use]
    pub fn new(services: RadarServices) -> Self {
        let overlay = Arc::new(Overlay {
            snapshot: Arc::new(Snapshot::new()),
            oracle: Arc::clone(&services.oracle),
            config: Arc::clone(&services.config),
            pass: RenderPass::new(),
            trigger: Mutex::new(None),
        });
        Self { services, overlay, interval: REFRESH_INTERVAL, running: None }
    }

    /// Overrides the refresh interval. Takes effect on the next start.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Spawns the refresh worker and subscribes to host events.
    ///
    /// # Errors
    ///
    /// [`RadarError::AlreadyRunning`] if started twice, or
    /// [`RadarError::WorkerSpawn`] if the worker thread cannot be created.
    /// Nothing is subscribed on error.
    pub fn start(&mut self) -> RadarResult<()> {
        if self.running.is_some() {
            return Err(RadarError::AlreadyRunning);
        }

        let refresher = Refresher::new(
            Arc::clone(&self.services.source),
            Arc::clone(&self.services.oracle),
            Arc::clone(&self.services.config),
            Arc::clone(&self.services.catalog),
            Arc::clone(&self.overlay.snapshot),
        );
        let worker = RefreshWorker::spawn(refresher, self.interval)?;
        *self.overlay.trigger.lock() = Some(worker.trigger());

        let listener: Arc<dyn HostListener> = self.overlay.clone();
        let subscription = self.services.host.subscribe(listener);

        info!(?subscription, "Radar started");
        self.running = Some(Running { subscription, worker });
        Ok(())
    }

    /// Stops the overlay. Returns `false` if the worker had to be detached.
    ///
    /// Safe to call more than once.
    pub fn shutdown(&mut self) -> bool {
        let Some(mut running) = self.running.take() else {
            return true;
        };

        if !self.services.host.unsubscribe(running.subscription) {
            warn!(subscription = ?running.subscription, "Listener was already removed");
        }
        *self.overlay.trigger.lock() = None;
        let joined = running.worker.shutdown(WORKER_JOIN_TIMEOUT);
        self.overlay.snapshot.clear();

        info!(joined, "Radar stopped");
        joined
    }

    /// `true` between [`Radar::start`] and [`Radar::shutdown`].
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Draws one frame. `None` when the suppression guard tripped.
    pub fn on_draw(&self, draw: &mut dyn DrawList, projector: &dyn Projector) -> Option<FrameOutcome> {
        self.overlay.draw(draw, projector)
    }

    /// Clears the snapshot for a new territory.
    pub fn on_territory_changed(&self, territory_id: u16) {
        self.overlay.on_territory_changed(territory_id);
    }

    /// Clears the snapshot on login.
    pub fn on_login(&self) {
        self.overlay.on_login();
    }

    /// Clears the snapshot on logout.
    pub fn on_logout(&self) {
        self.overlay.on_logout();
    }

    /// Wakes the worker for an immediate refresh.
    pub fn request_refresh(&self) {
        if let Some(running) = &self.running {
            running.worker.request_refresh();
        }
    }

    /// The published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.overlay.snapshot
    }

    /// Configuration, for UI-driven edits.
    #[must_use]
    pub fn config(&self) -> &Arc<SharedConfig> {
        &self.services.config
    }

    /// Render pass counters.
    #[must_use]
    pub fn render_stats(&self) -> RenderStats {
        self.overlay.pass.stats()
    }
}

impl Drop for Radar {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::EventHub;
    use radar_core::testing::{ScriptedZoneOracle, StaticEntitySource};
    use radar_core::{Configuration, Entity, ObjectKind};

    fn services(hub: Arc<EventHub>) -> RadarServices {
        RadarServices {
            source: Arc::new(StaticEntitySource::with(vec![Entity::new(1, ObjectKind::EventNpc, "Vendor")])),
            oracle: Arc::new(ScriptedZoneOracle::in_town()),
            config: Arc::new(SharedConfig::in_memory(Configuration::default())),
            catalog: Arc::new(Catalog::default()),
            host: hub,
        }
    }

    #[test]
    fn test_start_twice_rejected() {
        let hub = Arc::new(EventHub::new());
        let mut radar = Radar::new(services(hub.clone())).with_interval(Duration::from_secs(60));
        radar.start().unwrap();
        assert!(matches!(radar.start(), Err(RadarError::AlreadyRunning)));
        assert_eq!(hub.listener_count(), 1);
        assert!(radar.shutdown());
    }

    #[test]
    fn test_restart_after_shutdown() {
        let hub = Arc::new(EventHub::new());
        let mut radar = Radar::new(services(hub.clone())).with_interval(Duration::from_secs(60));
        radar.start().unwrap();
        assert!(radar.shutdown());
        assert!(!radar.is_running());
        assert_eq!(hub.listener_count(), 0);

        radar.start().unwrap();
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let hub = Arc::new(EventHub::new());
        {
            let mut radar = Radar::new(services(hub.clone())).with_interval(Duration::from_secs(60));
            radar.start().unwrap();
            assert_eq!(hub.listener_count(), 1);
        }
        assert_eq!(hub.listener_count(), 0);
    }
}
