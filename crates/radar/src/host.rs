//! # Host Events
//!
//! The host game client owns the frame loop and the session. The overlay
//! registers one [`HostListener`] through [`PluginHost::subscribe`] and
//! must remove it with [`PluginHost::unsubscribe`] before it is torn down.
//!
//! [`EventHub`] is an in-process host: it keeps the listener registry and
//! fans events out. Hosts that already have an event system implement
//! [`PluginHost`] directly.
//!
//! The registry is copy-on-write: subscribe and unsubscribe build a new
//! list, dispatch clones one `Arc`. Frames allocate nothing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use radar_render::{DrawList, Projector};

/// Handle returned by [`PluginHost::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callbacks the host invokes.
pub trait HostListener: Send + Sync {
    /// Once per displayed frame, on the host's draw thread.
    fn on_draw(&self, draw: &mut dyn DrawList, projector: &dyn Projector);

    /// The player entered a new territory.
    fn on_territory_changed(&self, territory_id: u16);

    /// A character logged in.
    fn on_login(&self);

    /// The character logged out.
    fn on_logout(&self);
}

/// Event registration offered by the host.
pub trait PluginHost: Send + Sync {
    /// Registers a listener for draw, territory and session events.
    fn subscribe(&self, listener: Arc<dyn HostListener>) -> SubscriptionId;

    /// Removes a listener. Returns `false` if `id` was not registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

type Registry = Arc<[(SubscriptionId, Arc<dyn HostListener>)]>;

/// In-process listener registry.
pub struct EventHub {
    listeners: RwLock<Registry>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub").field("listeners", &self.listener_count()).finish()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self { listeners: RwLock::new(Arc::from(Vec::new())), next_id: AtomicU64::new(0) }
    }
}

impl EventHub {
    /// Empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Dispatches a frame to every listener.
    pub fn draw_frame(&self, draw: &mut dyn DrawList, projector: &dyn Projector) {
        for (_, listener) in self.listeners_now().iter() {
            listener.on_draw(draw, projector);
        }
    }

    /// Dispatches a territory change.
    pub fn territory_changed(&self, territory_id: u16) {
        for (_, listener) in self.listeners_now().iter() {
            listener.on_territory_changed(territory_id);
        }
    }

    /// Dispatches a login.
    pub fn login(&self) {
        for (_, listener) in self.listeners_now().iter() {
            listener.on_login();
        }
    }

    /// Dispatches a logout.
    pub fn logout(&self) {
        for (_, listener) in self.listeners_now().iter() {
            listener.on_logout();
        }
    }

    // Callbacks run outside the lock so a listener may unsubscribe itself
    fn listeners_now(&self) -> Registry {
        Arc::clone(&*self.listeners.read())
    }
}

impl PluginHost for EventHub {
    fn subscribe(&self, listener: Arc<dyn HostListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut listeners = self.listeners.write();
        let next: Vec<_> = listeners.iter().cloned().chain(std::iter::once((id, listener))).collect();
        *listeners = Arc::from(next);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        if !listeners.iter().any(|(existing, _)| *existing == id) {
            return false;
        }
        let next: Vec<_> = listeners.iter().filter(|(existing, _)| *existing != id).cloned().collect();
        *listeners = Arc::from(next);
        true
    }
}
