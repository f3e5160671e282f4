//! In-memory collaborators for tests, benches and demos.

use parking_lot::Mutex;
use radar_shared::Vec3;

use crate::entity::Entity;
use crate::error::EntityFault;
use crate::source::{EntitySource, LocalPlayer, ZoneOracle};

/// Entity source returning whatever was last set.
#[derive(Debug, Default)]
pub struct StaticEntitySource {
    batch: Mutex<Vec<Result<Entity, EntityFault>>>,
}

impl StaticEntitySource {
    /// Empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Source that always yields `entities`.
    #[must_use]
    pub fn with(entities: Vec<Entity>) -> Self {
        Self { batch: Mutex::new(entities.into_iter().map(Ok).collect()) }
    }

    /// Replaces the next enumeration.
    pub fn set(&self, batch: Vec<Result<Entity, EntityFault>>) {
        *self.batch.lock() = batch;
    }
}

impl EntitySource for StaticEntitySource {
    fn enumerate(&self) -> Vec<Result<Entity, EntityFault>> {
        self.batch.lock().clone()
    }
}

#[derive(Debug, Clone, Copy)]
struct ZoneState {
    territory_id: u16,
    in_special_instance: bool,
    between_areas: bool,
    logging_out: bool,
    local_player: Option<LocalPlayer>,
}

/// Zone oracle whose answers are set by the test.
#[derive(Debug)]
pub struct ScriptedZoneOracle {
    state: Mutex<ZoneState>,
}

impl ScriptedZoneOracle {
    /// Object id of the default local player.
    pub const LOCAL_PLAYER_ID: u64 = 0x1000_0001;

    /// Logged in, level 90, standing at the origin of a city territory.
    #[must_use]
    pub fn in_town() -> Self {
        Self {
            state: Mutex::new(ZoneState {
                territory_id: 132,
                in_special_instance: false,
                between_areas: false,
                logging_out: false,
                local_player: Some(LocalPlayer {
                    object_id: Self::LOCAL_PLAYER_ID,
                    level: 90,
                    position: Vec3::ZERO,
                }),
            }),
        }
    }

    /// Moves to `territory_id`.
    pub fn set_territory(&self, territory_id: u16) {
        self.state.lock().territory_id = territory_id;
    }

    /// Sets the special-instance condition flag.
    pub fn set_special_instance(&self, value: bool) {
        self.state.lock().in_special_instance = value;
    }

    /// Sets the zone-transition flag.
    pub fn set_between_areas(&self, value: bool) {
        self.state.lock().between_areas = value;
    }

    /// Sets the logging-out flag.
    pub fn set_logging_out(&self, value: bool) {
        self.state.lock().logging_out = value;
    }

    /// Replaces the local player.
    pub fn set_local_player(&self, player: Option<LocalPlayer>) {
        self.state.lock().local_player = player;
    }
}

impl ZoneOracle for ScriptedZoneOracle {
    fn territory_id(&self) -> u16 {
        self.state.lock().territory_id
    }

    fn in_special_instance(&self) -> bool {
        self.state.lock().in_special_instance
    }

    fn is_between_areas(&self) -> bool {
        self.state.lock().between_areas
    }

    fn is_logging_out(&self) -> bool {
        self.state.lock().logging_out
    }

    fn local_player(&self) -> Option<LocalPlayer> {
        self.state.lock().local_player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::source::ZoneContext;

    #[test]
    fn test_zone_context_capture() {
        let catalog = Catalog::builtin().unwrap();
        let oracle = ScriptedZoneOracle::in_town();
        assert!(!ZoneContext::capture(&oracle, &catalog).is_special_zone);

        oracle.set_territory(561);
        assert!(ZoneContext::capture(&oracle, &catalog).is_special_zone);

        oracle.set_territory(132);
        oracle.set_special_instance(true);
        let ctx = ZoneContext::capture(&oracle, &catalog);
        assert!(ctx.is_special_zone);
        assert_eq!(ctx.local_player.map(|p| p.level), Some(90));
    }
}
