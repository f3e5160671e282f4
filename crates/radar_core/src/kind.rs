//! Kind table shared by the resolver and the renderer.
//!
//! Adding an entity kind means adding one row here.

use crate::config::KindRule;
use crate::entity::ObjectKind;

/// Which optional markers a kind supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawProfile {
    /// Has health; health ring and value may be drawn.
    pub health: bool,
    /// Aggro cone may be drawn.
    pub aggro: bool,
    /// Hitbox ring may be drawn.
    pub hitbox: bool,
}

impl DrawProfile {
    const PLAIN: Self = Self { health: false, aggro: false, hitbox: false };
    const PLAYER: Self = Self { health: true, aggro: false, hitbox: true };
    const BATTLE_NPC: Self = Self { health: true, aggro: true, hitbox: true };
}

/// Per-kind rule slot and draw profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindProfile {
    /// Generic rule for the kind.
    pub rule: KindRule,
    /// Optional markers.
    pub draw: DrawProfile,
}

impl KindProfile {
    /// Profile for `kind`.
    ///
    /// [`ObjectKind::None`] maps to the generic NPC rule; callers treat
    /// reaching it as a logic fault.
    #[must_use]
    pub const fn of(kind: ObjectKind) -> Self {
        let (rule, draw) = match kind {
            ObjectKind::Player => (KindRule::Player, DrawProfile::PLAYER),
            ObjectKind::BattleNpc => (KindRule::Npc, DrawProfile::BATTLE_NPC),
            ObjectKind::EventNpc => (KindRule::EventNpc, DrawProfile::PLAIN),
            ObjectKind::Treasure => (KindRule::Treasure, DrawProfile::PLAIN),
            ObjectKind::Aetheryte => (KindRule::Aetheryte, DrawProfile::PLAIN),
            ObjectKind::GatheringPoint => (KindRule::GatheringPoint, DrawProfile::PLAIN),
            ObjectKind::EventObj => (KindRule::EventObj, DrawProfile::PLAIN),
            ObjectKind::MountType => (KindRule::Mount, DrawProfile::PLAIN),
            ObjectKind::Companion => (KindRule::Companion, DrawProfile::PLAIN),
            ObjectKind::Retainer => (KindRule::Retainer, DrawProfile::PLAIN),
            ObjectKind::Area => (KindRule::Area, DrawProfile::PLAIN),
            ObjectKind::Housing => (KindRule::Housing, DrawProfile::PLAIN),
            ObjectKind::Cutscene => (KindRule::Cutscene, DrawProfile::PLAIN),
            ObjectKind::CardStand => (KindRule::CardStand, DrawProfile::PLAIN),
            ObjectKind::Ornament => (KindRule::Ornament, DrawProfile::PLAIN),
            ObjectKind::None => (KindRule::Npc, DrawProfile::PLAIN),
        };
        Self { rule, draw }
    }
}
