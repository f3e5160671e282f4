//! External collaborators: the entity source and the zone oracle.
//!
//! Both are implemented by the host bindings. The refresh worker calls
//! them from its own thread, so implementations must be `Send + Sync`.

use radar_shared::Vec3;

use crate::catalog::Catalog;
use crate::entity::Entity;
use crate::error::EntityFault;

/// Enumerates the world objects currently known to the host.
pub trait EntitySource: Send + Sync {
    /// One full enumeration. Entries that could not be read are reported
    /// as faults; the caller skips them.
    fn enumerate(&self) -> Vec<Result<Entity, EntityFault>>;
}

/// Identity and state of the local player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalPlayer {
    /// Host object id of the local player.
    pub object_id: u64,
    /// Current level.
    pub level: u8,
    /// World position.
    pub position: Vec3,
}

/// Session and zone state as reported by the host.
pub trait ZoneOracle: Send + Sync {
    /// Current territory id.
    fn territory_id(&self) -> u16;

    /// `true` while the "in deep dungeon" condition flag is set.
    fn in_special_instance(&self) -> bool;

    /// `true` while a zone transition is in progress.
    fn is_between_areas(&self) -> bool;

    /// `true` while logging out.
    fn is_logging_out(&self) -> bool;

    /// The local player, if one exists.
    fn local_player(&self) -> Option<LocalPlayer>;
}

/// Per-refresh zone context every entity is classified against.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ZoneContext {
    /// Inside a special-zone instance (deep dungeon and the like).
    pub is_special_zone: bool,
    /// Local player at capture time.
    pub local_player: Option<LocalPlayer>,
}

impl ZoneContext {
    /// Captures the context once for a refresh cycle.
    #[must_use]
    pub fn capture(oracle: &dyn ZoneOracle, catalog: &Catalog) -> Self {
        Self {
            is_special_zone: oracle.in_special_instance()
                || catalog.is_special_territory(oracle.territory_id()),
            local_player: oracle.local_player(),
        }
    }

    /// Normal-zone context with the given local player.
    #[must_use]
    pub const fn normal(local_player: Option<LocalPlayer>) -> Self {
        Self { is_special_zone: false, local_player }
    }

    /// Special-zone context with the given local player.
    #[must_use]
    pub const fn special(local_player: Option<LocalPlayer>) -> Self {
        Self { is_special_zone: true, local_player }
    }

    /// `true` if `entity` is the local player.
    #[inline]
    #[must_use]
    pub fn is_local_player(&self, entity: &Entity) -> bool {
        self.local_player.is_some_and(|p| p.object_id == entity.object_id)
    }
}
