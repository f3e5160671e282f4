//! # Render Pass
//!
//! Called once per host frame. Takes the snapshot lock with `try_lock`
//! and skips the frame if the refresh worker is mid-swap; a dropped frame
//! is cheaper than a stalled one.

use std::fmt::Write as _;

use radar_core::config::Configuration;
use radar_core::entity::{BattleNpcSubKind, Entity};
use radar_core::kind::KindProfile;
use radar_core::snapshot::{Snapshot, SnapshotEntry};
use radar_shared::constants::AGGRO_BASE_RADIUS;
use radar_shared::Vec3;
use tracing::trace;

use crate::draw::DrawList;
use crate::projector::Projector;
use crate::shapes;
use crate::stats::{FrameStats, RenderStats};

/// Per-frame inputs from the host.
#[derive(Clone, Copy)]
pub struct FrameInput<'a> {
    /// Camera projection for this frame.
    pub projector: &'a dyn Projector,
    /// Local player position, for distance labels and caps.
    pub local_position: Option<Vec3>,
}

/// What a frame did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Snapshot iterated.
    Drawn {
        /// Entries in the snapshot.
        entities: usize,
    },
    /// Snapshot lock was busy.
    Skipped,
}

/// Draws the snapshot.
#[derive(Debug, Default)]
pub struct RenderPass {
    stats: FrameStats,
}

impl RenderPass {
    /// New pass with zeroed stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter snapshot.
    #[must_use]
    pub fn stats(&self) -> RenderStats {
        self.stats.snapshot()
    }

    /// Draws every snapshot entry, or skips the frame on lock contention.
    pub fn render(
        &self,
        snapshot: &Snapshot,
        config: &Configuration,
        input: &FrameInput<'_>,
        draw: &mut dyn DrawList,
    ) -> FrameOutcome {
        let Some(entries) = snapshot.try_read() else {
            trace!("Snapshot busy, skipping frame");
            self.stats.record_skipped();
            return FrameOutcome::Skipped;
        };

        // Reused for every distance label this frame
        let mut scratch = String::new();
        for entry in entries.iter() {
            draw_entry(entry, config, input, draw, &mut scratch);
        }

        let entities = entries.len();
        drop(entries);
        self.stats.record_drawn(entities);
        FrameOutcome::Drawn { entities }
    }
}

fn draw_entry(
    entry: &SnapshotEntry,
    config: &Configuration,
    input: &FrameInput<'_>,
    draw: &mut dyn DrawList,
    scratch: &mut String,
) {
    let entity = &entry.entity;
    let profile = KindProfile::of(entity.kind).draw;
    let color = entry.color();
    let distance = input.local_position.map(|p| p.distance(entity.position));
    let projection = input.projector.world_to_screen(entity.position);

    if projection.on_screen {
        let pos = projection.screen;
        let parts = entry.rule.display_type.components();
        let has_health = profile.health && entity.max_hp > 0;

        if parts.health_bar && has_health {
            shapes::draw_health_circle(draw, pos, entity.current_hp, entity.max_hp, color);
        }
        if parts.health_value && has_health {
            shapes::draw_health_value(draw, pos, entity.current_hp, entity.max_hp, color);
        }
        if parts.name {
            match distance.filter(|_| entry.rule.draw_distance) {
                Some(d) => {
                    scratch.clear();
                    let _ = write!(scratch, "{} {d:.1}m", entry.label);
                    shapes::draw_name(draw, pos, scratch, color);
                }
                None => shapes::draw_name(draw, pos, &entry.label, color),
            }
        }
        if parts.dot {
            let radius = if entry.rule.dot_size_override { entry.rule.dot_size } else { config.dot_size };
            shapes::draw_dot(draw, pos, radius, color);
        }
        if profile.hitbox && config.hitbox.hitbox_enabled {
            shapes::draw_hitbox(draw, input.projector, entity.position, entity.hitbox_radius, color, &config.hitbox);
        }
    } else if config.show_off_screen {
        shapes::draw_off_screen(draw, projection.screen, input.projector.viewport(), &config.off_screen, color);
    }

    if profile.aggro && aggro_allowed(entity, distance, config) {
        shapes::draw_aggro_cone(
            draw,
            input.projector,
            entity.position,
            AGGRO_BASE_RADIUS + entity.hitbox_radius,
            entity.rotation,
            &config.aggro,
        );
    }
}

/// Cones are for hostile mobs only; pets and party NPCs never aggro.
fn aggro_allowed(entity: &Entity, distance: Option<f32>, config: &Configuration) -> bool {
    let aggro = &config.aggro;
    if !aggro.show_aggro_circle || entity.sub_kind != BattleNpcSubKind::Enemy {
        return false;
    }
    if entity.weapon_drawn && !aggro.show_aggro_circle_in_combat {
        return false;
    }
    !(aggro.max_distance_cap && distance.is_some_and(|d| d > aggro.max_distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CommandBuffer, DrawCommand};
    use crate::projector::TopDownProjector;
    use radar_core::config::{DisplayType, EspOption, KindRule, RuleRef};
    use radar_core::entity::{BattleNpcSubKind, Entity, ObjectKind};
    use radar_shared::{Rgba, Vec2};

    fn projector() -> TopDownProjector {
        TopDownProjector::new(Vec3::ZERO, 10.0, Vec2::new(1000.0, 1000.0))
    }

    fn entry(entity: Entity, display_type: DisplayType) -> SnapshotEntry {
        SnapshotEntry {
            label: entity.name.clone(),
            entity,
            rule: EspOption::new(Rgba::RED, display_type),
            rule_ref: RuleRef::Kind(KindRule::Npc),
        }
    }

    fn goblin() -> Entity {
        Entity::new(1, ObjectKind::BattleNpc, "Goblin")
            .with_sub_kind(BattleNpcSubKind::Enemy)
            .with_health(50, 100)
            .at(Vec3::new(5.0, 0.0, 5.0))
    }

    fn render(entries: Vec<SnapshotEntry>, config: &Configuration, local: Option<Vec3>) -> (FrameOutcome, CommandBuffer) {
        let snapshot = Snapshot::new();
        snapshot.publish(entries);
        let proj = projector();
        let input = FrameInput { projector: &proj, local_position: local };
        let mut buf = CommandBuffer::new();
        let outcome = RenderPass::new().render(&snapshot, config, &input, &mut buf);
        (outcome, buf)
    }

    #[test]
    fn test_full_marker_set() {
        let (outcome, buf) = render(
            vec![entry(goblin(), DisplayType::HealthBarAndValueAndName)],
            &Configuration::default(),
            None,
        );
        assert_eq!(outcome, FrameOutcome::Drawn { entities: 1 });
        assert_eq!(buf.count(|c| matches!(c, DrawCommand::Polyline { .. })), 1);
        assert_eq!(buf.texts().collect::<Vec<_>>(), vec!["50%", "Goblin"]);
        assert_eq!(buf.count(|c| matches!(c, DrawCommand::CircleFilled { .. })), 0);
    }

    #[test]
    fn test_dot_size_override() {
        let mut config = Configuration::default();
        config.dot_size = 3.0;
        let mut e = entry(goblin(), DisplayType::DotOnly);
        let (_, buf) = render(vec![e.clone()], &config, None);
        assert!(matches!(buf.commands(), [DrawCommand::CircleFilled { radius, .. }] if *radius == 3.0));

        e.rule.dot_size_override = true;
        e.rule.dot_size = 8.0;
        let (_, buf) = render(vec![e], &config, None);
        assert!(matches!(buf.commands(), [DrawCommand::CircleFilled { radius, .. }] if *radius == 8.0));
    }

    #[test]
    fn test_distance_in_label() {
        let mut e = entry(goblin().at(Vec3::new(3.0, 0.0, 4.0)), DisplayType::NameOnly);
        e.rule.draw_distance = true;
        let (_, buf) = render(vec![e], &Configuration::default(), Some(Vec3::ZERO));
        assert_eq!(buf.texts().collect::<Vec<_>>(), vec!["Goblin 5.0m"]);
    }

    #[test]
    fn test_health_skipped_without_max_hp() {
        let e = entry(goblin().with_health(0, 0), DisplayType::HealthBarAndValue);
        let (_, buf) = render(vec![e], &Configuration::default(), None);
        assert!(buf.commands().is_empty());
    }

    #[test]
    fn test_off_screen_marker_toggle() {
        let far = entry(goblin().at(Vec3::new(500.0, 0.0, 0.0)), DisplayType::DotAndName);

        let (_, buf) = render(vec![far.clone()], &Configuration::default(), None);
        assert!(buf.commands().is_empty());

        let config = Configuration { show_off_screen: true, ..Configuration::default() };
        let (_, buf) = render(vec![far], &config, None);
        assert_eq!(buf.count(|c| matches!(c, DrawCommand::ConvexFill { .. })), 1);
        assert!(buf.texts().next().is_none());
    }

    #[test]
    fn test_aggro_cone_gates() {
        let mut config = Configuration::default();
        config.aggro.show_aggro_circle = true;
        let fills = |buf: &CommandBuffer| buf.count(|c| matches!(c, DrawCommand::ConvexFill { .. }));

        let (_, buf) = render(vec![entry(goblin(), DisplayType::NameOnly)], &config, None);
        assert_eq!(fills(&buf), 1);

        let mut in_combat = goblin();
        in_combat.weapon_drawn = true;
        let (_, buf) = render(vec![entry(in_combat.clone(), DisplayType::NameOnly)], &config, None);
        assert_eq!(fills(&buf), 0);

        config.aggro.show_aggro_circle_in_combat = true;
        let (_, buf) = render(vec![entry(in_combat, DisplayType::NameOnly)], &config, None);
        assert_eq!(fills(&buf), 1);

        config.aggro.max_distance_cap = true;
        config.aggro.max_distance = 5.0;
        let (_, buf) = render(vec![entry(goblin(), DisplayType::NameOnly)], &config, Some(Vec3::ZERO));
        assert_eq!(fills(&buf), 0);

        // Treasure never gets a cone
        let coffer = Entity::new(2, ObjectKind::Treasure, "Coffer");
        config.aggro.max_distance_cap = false;
        let (_, buf) = render(vec![entry(coffer, DisplayType::DotOnly)], &config, None);
        assert_eq!(fills(&buf), 0);
    }

    #[test]
    fn test_aggro_cone_radius_and_facing() {
        let mut config = Configuration::default();
        config.aggro.show_aggro_circle = true;
        // Facing +x with a 2 yalm hitbox: cone radius is 10 + 2
        let mob = goblin().at(Vec3::ZERO).with_facing(std::f32::consts::FRAC_PI_2, 2.0);
        let (_, buf) = render(vec![entry(mob, DisplayType::NameOnly)], &config, None);

        let Some(DrawCommand::Polyline { points, .. }) =
            buf.commands().iter().find(|c| matches!(c, DrawCommand::Polyline { .. }))
        else {
            panic!("front arc missing: {:?}", buf.commands());
        };
        assert_eq!(points.len(), 51);
        let mid = points[25];
        assert!((mid.x - 620.0).abs() < 0.01, "{mid:?}");
        assert!((mid.y - 500.0).abs() < 0.01, "{mid:?}");
        // Arc ends sit 45 degrees either side of the facing
        let end = points[0];
        let reach = ((end.x - 500.0).powi(2) + (end.y - 500.0).powi(2)).sqrt();
        assert!((reach - 120.0).abs() < 0.01, "{end:?}");
    }

    #[test]
    fn test_aggro_cone_only_for_enemies() {
        let mut config = Configuration::default();
        config.aggro.show_aggro_circle = true;
        let fills = |buf: &CommandBuffer| buf.count(|c| matches!(c, DrawCommand::ConvexFill { .. }));

        for sub_kind in [
            BattleNpcSubKind::Pet,
            BattleNpcSubKind::Chocobo,
            BattleNpcSubKind::NpcPartyMember,
            BattleNpcSubKind::None,
        ] {
            let npc = goblin().with_sub_kind(sub_kind);
            let (_, buf) = render(vec![entry(npc, DisplayType::NameOnly)], &config, None);
            assert_eq!(fills(&buf), 0, "{sub_kind:?}");
        }
    }

    #[test]
    fn test_distance_labels_do_not_leak_between_entries() {
        let mut near = entry(goblin().at(Vec3::new(3.0, 0.0, 4.0)), DisplayType::NameOnly);
        near.rule.draw_distance = true;
        let mut far = entry(Entity::new(9, ObjectKind::BattleNpc, "Orc").at(Vec3::new(0.0, 0.0, 10.0)), DisplayType::NameOnly);
        far.rule.draw_distance = true;
        let (_, buf) = render(vec![near, far], &Configuration::default(), Some(Vec3::ZERO));
        assert_eq!(buf.texts().collect::<Vec<_>>(), vec!["Goblin 5.0m", "Orc 10.0m"]);
    }

    #[test]
    fn test_hitbox_only_for_battle_chara() {
        let mut config = Configuration::default();
        config.hitbox.hitbox_enabled = true;
        let closed = |buf: &CommandBuffer| buf.count(|c| matches!(c, DrawCommand::Polyline { closed: true, .. }));

        let (_, buf) = render(vec![entry(goblin(), DisplayType::DotOnly)], &config, None);
        assert_eq!(closed(&buf), 1);

        let lever = Entity::new(3, ObjectKind::EventObj, "Lever");
        let (_, buf) = render(vec![entry(lever, DisplayType::DotOnly)], &config, None);
        assert_eq!(closed(&buf), 0);
    }

    #[test]
    fn test_skips_frame_when_locked() {
        let snapshot = Snapshot::new();
        snapshot.publish(vec![entry(goblin(), DisplayType::DotOnly)]);
        let proj = projector();
        let input = FrameInput { projector: &proj, local_position: None };
        let pass = RenderPass::new();
        let mut buf = CommandBuffer::new();

        let held = snapshot.read();
        assert_eq!(pass.render(&snapshot, &Configuration::default(), &input, &mut buf), FrameOutcome::Skipped);
        drop(held);
        assert!(buf.commands().is_empty());

        assert_eq!(
            pass.render(&snapshot, &Configuration::default(), &input, &mut buf),
            FrameOutcome::Drawn { entities: 1 }
        );
        let stats = pass.stats();
        assert_eq!((stats.frames_drawn, stats.frames_skipped), (1, 1));
    }
}
