//! # Entity Model
//!
//! A plain-data copy of one world object as read from the entity source
//! during a single enumeration. The core never keeps references into the
//! host's object table; everything it needs is copied here.

use radar_shared::Vec3;

/// Object kind as reported by the host's object table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// No kind. Reaching rule resolution with this kind is a logic fault.
    #[default]
    None,
    /// Player character.
    Player,
    /// Combat-capable NPC (enemies, pets, chocobos, party NPCs).
    BattleNpc,
    /// Non-combat NPC.
    EventNpc,
    /// Treasure coffer.
    Treasure,
    /// Aetheryte crystal.
    Aetheryte,
    /// Gathering node.
    GatheringPoint,
    /// Interactive event object.
    EventObj,
    /// Mount.
    MountType,
    /// Minion.
    Companion,
    /// Retainer.
    Retainer,
    /// Area object.
    Area,
    /// Housing object.
    Housing,
    /// Cutscene actor.
    Cutscene,
    /// Card game stand.
    CardStand,
    /// Fashion accessory.
    Ornament,
}

impl ObjectKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 16] = [
        Self::None,
        Self::Player,
        Self::BattleNpc,
        Self::EventNpc,
        Self::Treasure,
        Self::Aetheryte,
        Self::GatheringPoint,
        Self::EventObj,
        Self::MountType,
        Self::Companion,
        Self::Retainer,
        Self::Area,
        Self::Housing,
        Self::Cutscene,
        Self::CardStand,
        Self::Ornament,
    ];

    /// Player and BattleNpc carry health, level and a death state.
    #[inline]
    #[must_use]
    pub const fn is_battle_chara(self) -> bool {
        matches!(self, Self::Player | Self::BattleNpc)
    }
}

/// Sub-kind of a [`ObjectKind::BattleNpc`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BattleNpcSubKind {
    /// Not a battle NPC, or unknown.
    #[default]
    None,
    /// Multi-part boss component.
    Part,
    /// Summoner / scholar pet.
    Pet,
    /// Chocobo companion.
    Chocobo,
    /// Hostile enemy.
    Enemy,
    /// Trust / duty-support party member.
    NpcPartyMember,
}

impl BattleNpcSubKind {
    /// Pets and chocobos share the companion rule.
    #[inline]
    #[must_use]
    pub const fn is_companion(self) -> bool {
        matches!(self, Self::Pet | Self::Chocobo)
    }
}

/// Relationship flags of a player character relative to the local player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Relationship(u8);

impl Relationship {
    /// No relationship.
    pub const NONE: Self = Self(0);
    /// On the friend list.
    pub const FRIEND: Self = Self(1 << 0);
    /// In the local player's party.
    pub const PARTY_MEMBER: Self = Self(1 << 1);
    /// In the local player's alliance.
    pub const ALLIANCE_MEMBER: Self = Self(1 << 2);

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every flag in `other` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for Relationship {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// One world object, copied out of the host during enumeration.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Host object id. Unique within an enumeration.
    pub object_id: u64,
    /// Stable type id (BNpc base / event object id). `0` means no stable identity.
    pub data_id: u32,
    /// Object kind.
    pub kind: ObjectKind,
    /// Battle NPC sub-kind.
    pub sub_kind: BattleNpcSubKind,
    /// Display name; may be empty.
    pub name: String,
    /// World position.
    pub position: Vec3,
    /// Facing, radians. `0` faces `+z`.
    pub rotation: f32,
    /// Hitbox radius in world units.
    pub hitbox_radius: f32,
    /// `false` when the host's render flags say the object is not drawn.
    pub render_visible: bool,
    /// Source-reported validity.
    pub valid: bool,
    /// Death state (battle characters only).
    pub is_dead: bool,
    /// Weapon drawn (in-combat status flag).
    pub weapon_drawn: bool,
    /// Friend / party / alliance flags (players only).
    pub relationship: Relationship,
    /// Level (battle characters only).
    pub level: u8,
    /// Current health.
    pub current_hp: u32,
    /// Maximum health.
    pub max_hp: u32,
}

impl Entity {
    /// Creates a valid, visible, alive entity at the origin.
    #[must_use]
    pub fn new(object_id: u64, kind: ObjectKind, name: impl Into<String>) -> Self {
        Self {
            object_id,
            data_id: 0,
            kind,
            sub_kind: BattleNpcSubKind::None,
            name: name.into(),
            position: Vec3::ZERO,
            rotation: 0.0,
            hitbox_radius: 0.5,
            render_visible: true,
            valid: true,
            is_dead: false,
            weapon_drawn: false,
            relationship: Relationship::NONE,
            level: 1,
            current_hp: 0,
            max_hp: 0,
        }
    }

    /// Sets the stable type id.
    #[must_use]
    pub fn with_data_id(mut self, data_id: u32) -> Self {
        self.data_id = data_id;
        self
    }

    /// Sets the battle NPC sub-kind.
    #[must_use]
    pub fn with_sub_kind(mut self, sub_kind: BattleNpcSubKind) -> Self {
        self.sub_kind = sub_kind;
        self
    }

    /// Sets the world position.
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets relationship flags.
    #[must_use]
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = relationship;
        self
    }

    /// Sets the level.
    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// Sets current and maximum health.
    #[must_use]
    pub fn with_health(mut self, current: u32, max: u32) -> Self {
        self.current_hp = current;
        self.max_hp = max;
        self
    }

    /// Sets facing and hitbox radius.
    #[must_use]
    pub fn with_facing(mut self, rotation: f32, hitbox_radius: f32) -> Self {
        self.rotation = rotation;
        self.hitbox_radius = hitbox_radius;
        self
    }

    /// Marks the entity dead.
    #[must_use]
    pub fn dead(mut self) -> Self {
        self.is_dead = true;
        self
    }

    /// Marks the entity render-suppressed.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.render_visible = false;
        self
    }

    /// Returns `true` when the display name is empty or whitespace.
    #[inline]
    #[must_use]
    pub fn is_nameless(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// Health fraction in `0..=1`, or `None` when max health is zero.
    #[must_use]
    pub fn health_fraction(&self) -> Option<f32> {
        if self.max_hp == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = self.current_hp.min(self.max_hp) as f32 / self.max_hp as f32;
        Some(fraction)
    }
}
