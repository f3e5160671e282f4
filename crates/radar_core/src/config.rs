//! # Configuration
//!
//! The resolved, in-memory settings object. Every struct is
//! `#[serde(default)]` so files written by older versions keep loading.
//!
//! Display rules come in three shapes:
//! - [`EspOption`]: one per entity-kind category and one per zone subtype
//! - [`SeparatedEspOption`]: an opt-in override category (self, party, rank-1, ...)
//! - [`LevelRendering`]: the level-below-threshold override

use std::collections::{BTreeMap, BTreeSet};

use radar_shared::color::OpacityMask;
use radar_shared::Rgba;
use serde::{Deserialize, Serialize};

use crate::catalog::ZoneSubtype;

// =============================================================================
// DISPLAY RULES
// =============================================================================

/// Which markers are drawn for an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayType {
    /// Dot only.
    DotOnly,
    /// Name label only.
    NameOnly,
    /// Dot and name label.
    #[default]
    DotAndName,
    /// Health ring only.
    HealthBarOnly,
    /// Health ring and percentage.
    HealthBarAndValue,
    /// Health ring and name.
    HealthBarAndName,
    /// Health ring, percentage and name.
    HealthBarAndValueAndName,
    /// Health percentage only.
    HealthValueOnly,
    /// Health percentage and name.
    HealthValueAndName,
    /// Kind default (dot and name).
    Default,
}

/// Markers selected by a [`DisplayType`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayComponents {
    /// Filled dot at the position.
    pub dot: bool,
    /// Name label under the position.
    pub name: bool,
    /// Health ring.
    pub health_bar: bool,
    /// Health percentage.
    pub health_value: bool,
}

impl DisplayType {
    /// Decomposes into individual markers.
    #[must_use]
    pub const fn components(self) -> DisplayComponents {
        let (dot, name, health_bar, health_value) = match self {
            Self::DotOnly => (true, false, false, false),
            Self::NameOnly => (false, true, false, false),
            Self::DotAndName | Self::Default => (true, true, false, false),
            Self::HealthBarOnly => (false, false, true, false),
            Self::HealthBarAndValue => (false, false, true, true),
            Self::HealthBarAndName => (false, true, true, false),
            Self::HealthBarAndValueAndName => (false, true, true, true),
            Self::HealthValueOnly => (false, false, false, true),
            Self::HealthValueAndName => (false, true, false, true),
        };
        DisplayComponents { dot, name, health_bar, health_value }
    }

    /// `true` if any health marker is selected.
    #[must_use]
    pub const fn shows_health(self) -> bool {
        let c = self.components();
        c.health_bar || c.health_value
    }

    /// Nearest display type without health markers.
    #[must_use]
    pub const fn without_health(self) -> Self {
        match self {
            Self::HealthBarOnly | Self::HealthBarAndValue | Self::HealthValueOnly => Self::DotOnly,
            Self::HealthBarAndName | Self::HealthBarAndValueAndName | Self::HealthValueAndName => {
                Self::DotAndName
            }
            other => other,
        }
    }
}

/// A display rule: the visual parameters applied to a class of entities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EspOption {
    /// Entities resolved to this rule are drawn.
    pub enabled: bool,
    /// Markers to draw.
    pub display_type: DisplayType,
    /// Marker color.
    pub color: Rgba,
    /// Append the distance to the local player to the label.
    pub draw_distance: bool,
    /// Use [`EspOption::dot_size`] instead of the global dot size.
    pub dot_size_override: bool,
    /// Dot radius in pixels when overridden.
    pub dot_size: f32,
    /// Append the entity level to the label.
    pub append_level: bool,
}

impl EspOption {
    /// Enabled rule with the given color and display type.
    #[must_use]
    pub fn new(color: Rgba, display_type: DisplayType) -> Self {
        Self { enabled: true, display_type, color, ..Self::default() }
    }

    /// Disabled rule with the given color.
    #[must_use]
    pub fn disabled(color: Rgba) -> Self {
        Self { enabled: false, color, ..Self::default() }
    }
}

impl Default for EspOption {
    fn default() -> Self {
        Self {
            enabled: true,
            display_type: DisplayType::DotAndName,
            color: Rgba::WHITE,
            draw_distance: false,
            dot_size_override: false,
            dot_size: 2.2,
            append_level: false,
        }
    }
}

/// Opt-in override category.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparatedEspOption {
    /// Category takes priority over the generic kind rule.
    pub enabled: bool,
    /// The rule applied when the category matches.
    pub option: EspOption,
}

impl SeparatedEspOption {
    fn off(color: Rgba) -> Self {
        Self { enabled: false, option: EspOption::new(color, DisplayType::DotAndName) }
    }
}

/// Level-below-threshold override for battle NPCs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelRendering {
    /// Override active.
    pub enabled: bool,
    /// An NPC matches when `local_level - relative_level > npc_level`.
    pub relative_level: u8,
    /// Rule for matching NPCs.
    pub option: EspOption,
}

impl Default for LevelRendering {
    fn default() -> Self {
        Self {
            enabled: false,
            relative_level: 10,
            option: EspOption::new(Rgba::from_channels(0x80, 0x80, 0x80, 0xFF), DisplayType::DotOnly),
        }
    }
}

/// Sub-rules used inside special zones, keyed by [`ZoneSubtype`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct DeepDungeonOptions {
    pub default_enemy: EspOption,
    pub special_undead: EspOption,
    pub auspice: EspOption,
    pub easy_mobs: EspOption,
    pub traps: EspOption,
    pub return_: EspOption,
    pub passage: EspOption,
    pub gold_chest: EspOption,
    pub silver_chest: EspOption,
    pub bronze_chest: EspOption,
    pub accursed_hoard: EspOption,
    pub mimic: EspOption,
}

impl DeepDungeonOptions {
    /// Rule for a subtype.
    #[must_use]
    pub const fn option(&self, subtype: ZoneSubtype) -> &EspOption {
        match subtype {
            ZoneSubtype::Default => &self.default_enemy,
            ZoneSubtype::SpecialUndead => &self.special_undead,
            ZoneSubtype::Auspice => &self.auspice,
            ZoneSubtype::EasyMobs => &self.easy_mobs,
            ZoneSubtype::Traps => &self.traps,
            ZoneSubtype::Return => &self.return_,
            ZoneSubtype::Passage => &self.passage,
            ZoneSubtype::GoldChest => &self.gold_chest,
            ZoneSubtype::SilverChest => &self.silver_chest,
            ZoneSubtype::BronzeChest => &self.bronze_chest,
            ZoneSubtype::AccursedHoard => &self.accursed_hoard,
            ZoneSubtype::Mimic => &self.mimic,
        }
    }

    /// Mutable rule for a subtype.
    pub fn option_mut(&mut self, subtype: ZoneSubtype) -> &mut EspOption {
        match subtype {
            ZoneSubtype::Default => &mut self.default_enemy,
            ZoneSubtype::SpecialUndead => &mut self.special_undead,
            ZoneSubtype::Auspice => &mut self.auspice,
            ZoneSubtype::EasyMobs => &mut self.easy_mobs,
            ZoneSubtype::Traps => &mut self.traps,
            ZoneSubtype::Return => &mut self.return_,
            ZoneSubtype::Passage => &mut self.passage,
            ZoneSubtype::GoldChest => &mut self.gold_chest,
            ZoneSubtype::SilverChest => &mut self.silver_chest,
            ZoneSubtype::BronzeChest => &mut self.bronze_chest,
            ZoneSubtype::AccursedHoard => &mut self.accursed_hoard,
            ZoneSubtype::Mimic => &mut self.mimic,
        }
    }
}

impl Default for DeepDungeonOptions {
    fn default() -> Self {
        let purple = Rgba::from_channels(0x99, 0x33, 0xFF, 0xFF);
        let orange = Rgba::from_channels(0xFF, 0x80, 0x00, 0xFF);
        let bronze = Rgba::from_channels(0xCD, 0x7F, 0x32, 0xFF);
        let silver = Rgba::from_channels(0xC0, 0xC0, 0xC0, 0xFF);
        Self {
            default_enemy: EspOption::new(Rgba::RED, DisplayType::HealthBarAndValueAndName),
            special_undead: EspOption::new(purple, DisplayType::HealthBarAndValueAndName),
            auspice: EspOption::new(orange, DisplayType::HealthBarAndValueAndName),
            easy_mobs: EspOption::new(Rgba::GREEN, DisplayType::DotAndName),
            traps: EspOption::new(orange, DisplayType::DotAndName),
            return_: EspOption::new(Rgba::BLUE, DisplayType::DotAndName),
            passage: EspOption::new(Rgba::BLUE, DisplayType::DotAndName),
            gold_chest: EspOption::new(Rgba::GOLD, DisplayType::DotAndName),
            silver_chest: EspOption::new(silver, DisplayType::DotAndName),
            bronze_chest: EspOption::new(bronze, DisplayType::DotAndName),
            accursed_hoard: EspOption::new(Rgba::YELLOW, DisplayType::DotAndName),
            mimic: EspOption::new(Rgba::RED, DisplayType::HealthBarAndValueAndName),
        }
    }
}

// =============================================================================
// VISUAL PARAMETERS
// =============================================================================

/// Aggro cone around hostile battle NPCs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggroRadiusOptions {
    /// Draw aggro cones.
    pub show_aggro_circle: bool,
    /// Also draw cones for NPCs with their weapon drawn.
    pub show_aggro_circle_in_combat: bool,
    /// Skip cones beyond [`AggroRadiusOptions::max_distance`].
    pub max_distance_cap: bool,
    /// Distance cap in world units.
    pub max_distance: f32,
    /// Front arc color.
    pub front_color: Rgba,
    /// Rear arc color.
    pub rear_color: Rgba,
    /// Left arc color.
    pub left_side_color: Rgba,
    /// Right arc color.
    pub right_side_color: Rgba,
    /// Front cone fill color.
    pub front_cone_color: Rgba,
    /// Opacity applied to the arcs.
    pub circle_opacity: OpacityMask,
    /// Opacity applied to the front cone fill.
    pub front_cone_opacity: OpacityMask,
}

impl Default for AggroRadiusOptions {
    fn default() -> Self {
        Self {
            show_aggro_circle: false,
            show_aggro_circle_in_combat: false,
            max_distance_cap: false,
            max_distance: 50.0,
            front_color: Rgba::RED,
            rear_color: Rgba::GREEN,
            left_side_color: Rgba::YELLOW,
            right_side_color: Rgba::YELLOW,
            front_cone_color: Rgba::RED,
            circle_opacity: OpacityMask::OPAQUE,
            front_cone_opacity: OpacityMask::from_fraction(0.2),
        }
    }
}

/// Hitbox ring around battle characters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxOptions {
    /// Draw hitbox rings.
    pub hitbox_enabled: bool,
    /// Use [`HitboxOptions::hitbox_color`] instead of the rule color.
    pub override_mob_color: bool,
    /// Ring color when overridden.
    pub hitbox_color: Rgba,
    /// Ring stroke thickness.
    pub thickness: f32,
    /// Fill the inside of the ring.
    pub draw_inside_circle: bool,
    /// Fill with [`HitboxOptions::inside_color`] instead of the ring color.
    pub use_different_inside_color: bool,
    /// Fill color.
    pub inside_color: Rgba,
    /// Opacity applied to the ring color when filling with it.
    pub inside_opacity: OpacityMask,
}

impl Default for HitboxOptions {
    fn default() -> Self {
        Self {
            hitbox_enabled: false,
            override_mob_color: false,
            hitbox_color: Rgba::WHITE,
            thickness: 1.0,
            draw_inside_circle: false,
            use_different_inside_color: false,
            inside_color: Rgba::WHITE.with_alpha(0x40),
            inside_opacity: OpacityMask::from_fraction(0.25),
        }
    }
}

/// Edge-of-screen markers for entities that project off-screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffScreenOptions {
    /// Inset from the screen edge in pixels.
    pub distance_from_edge: f32,
    /// Arrow size in pixels.
    pub size: f32,
    /// Outline thickness.
    pub thickness: f32,
}

impl Default for OffScreenOptions {
    fn default() -> Self {
        Self { distance_from_edge: 15.0, size: 6.0, thickness: 2.0 }
    }
}

// =============================================================================
// RULE REFERENCES
// =============================================================================

/// Per-kind rule slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum KindRule {
    Player,
    Npc,
    EventNpc,
    Treasure,
    Aetheryte,
    GatheringPoint,
    EventObj,
    Mount,
    Companion,
    Retainer,
    Area,
    Housing,
    Cutscene,
    CardStand,
    Ornament,
}

/// Names every configurable display rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleRef {
    /// Generic per-kind rule.
    Kind(KindRule),
    /// Special-zone subtype rule.
    Zone(ZoneSubtype),
    /// Separated: the local player.
    YourPlayer,
    /// Separated: friends.
    Friends,
    /// Separated: party members.
    Party,
    /// Separated: alliance members.
    Alliance,
    /// Separated: rank-1 battle NPCs.
    RankOne,
    /// Separated: rank-2 and rank-6 battle NPCs.
    RankTwoAndSix,
    /// Level-below-threshold battle NPCs.
    LevelBelow,
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Current on-disk format version.
pub const CONFIG_VERSION: u32 = 1;

/// The full settings object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Format version.
    pub version: u32,
    /// Global enable.
    pub enabled: bool,
    /// Hide entities the host does not render.
    pub show_only_visible: bool,
    /// With `show_only_visible`, still show render-suppressed players.
    pub override_show_invisible_players: bool,
    /// Show entities with a blank name.
    pub show_nameless: bool,
    /// Show every valid, non-blocked entity (diagnostic view).
    pub debug_mode: bool,
    /// Replace labels with `name, data_id, kind`.
    pub debug_text: bool,
    /// Use special-zone classification inside special zones.
    pub show_zone_special: bool,
    /// Prefix labels with the rank when known.
    pub rank_text: bool,
    /// Draw edge markers for off-screen entities.
    pub show_off_screen: bool,
    /// Hide entities beyond [`Configuration::max_distance`].
    pub use_max_distance: bool,
    /// Maximum distance from the local player, world units.
    pub max_distance: f32,
    /// Default dot radius in pixels.
    pub dot_size: f32,
    /// User block-list.
    pub data_id_ignore_list: BTreeSet<u32>,

    /// Rule for players.
    pub player_option: EspOption,
    /// Rule for battle NPCs.
    pub npc_option: EspOption,
    /// Rule for event NPCs.
    pub event_npc_option: EspOption,
    /// Rule for treasure coffers.
    pub treasure_option: EspOption,
    /// Rule for aetherytes.
    pub aetheryte_option: EspOption,
    /// Rule for gathering nodes.
    pub gathering_point_option: EspOption,
    /// Rule for event objects.
    pub event_obj_option: EspOption,
    /// Rule for mounts.
    pub mount_option: EspOption,
    /// Rule for companions, pets and chocobos.
    pub companion_option: EspOption,
    /// Rule for retainers.
    pub retainer_option: EspOption,
    /// Rule for area objects.
    pub area_option: EspOption,
    /// Rule for housing objects.
    pub housing_option: EspOption,
    /// Rule for cutscene actors.
    pub cutscene_option: EspOption,
    /// Rule for card stands.
    pub card_stand_option: EspOption,
    /// Rule for ornaments.
    pub ornament_option: EspOption,

    /// Separated: the local player.
    pub separated_your_player: SeparatedEspOption,
    /// Separated: friends.
    pub separated_friends: SeparatedEspOption,
    /// Separated: party members.
    pub separated_party: SeparatedEspOption,
    /// Separated: alliance members.
    pub separated_alliance: SeparatedEspOption,
    /// Separated: rank-1 battle NPCs.
    pub separated_rank_one: SeparatedEspOption,
    /// Separated: rank-2 and rank-6 battle NPCs.
    pub separated_rank_two_and_six: SeparatedEspOption,
    /// Level-below-threshold battle NPCs.
    pub level_rendering: LevelRendering,

    /// Special-zone subtype rules.
    pub deep_dungeon: DeepDungeonOptions,
    /// Aggro cone parameters.
    pub aggro: AggroRadiusOptions,
    /// Hitbox ring parameters.
    pub hitbox: HitboxOptions,
    /// Off-screen marker parameters.
    pub off_screen: OffScreenOptions,

    /// Per data-id color override.
    #[serde(with = "data_id_keys")]
    pub color_override: BTreeMap<u32, Rgba>,
}

impl Default for Configuration {
    fn default() -> Self {
        let off = EspOption::disabled;
        Self {
            version: CONFIG_VERSION,
            enabled: true,
            show_only_visible: true,
            override_show_invisible_players: false,
            show_nameless: false,
            debug_mode: false,
            debug_text: false,
            show_zone_special: true,
            rank_text: false,
            show_off_screen: false,
            use_max_distance: false,
            max_distance: 100.0,
            dot_size: 2.2,
            data_id_ignore_list: BTreeSet::new(),

            player_option: off(Rgba::WHITE),
            npc_option: EspOption::new(Rgba::WHITE, DisplayType::HealthBarAndValueAndName),
            event_npc_option: off(Rgba::WHITE),
            treasure_option: off(Rgba::GOLD),
            aetheryte_option: off(Rgba::BLUE),
            gathering_point_option: off(Rgba::GREEN),
            event_obj_option: off(Rgba::WHITE),
            mount_option: off(Rgba::WHITE),
            companion_option: off(Rgba::WHITE),
            retainer_option: off(Rgba::WHITE),
            area_option: off(Rgba::WHITE),
            housing_option: off(Rgba::WHITE),
            cutscene_option: off(Rgba::WHITE),
            card_stand_option: off(Rgba::WHITE),
            ornament_option: off(Rgba::WHITE),

            separated_your_player: SeparatedEspOption::off(Rgba::GREEN),
            separated_friends: SeparatedEspOption::off(Rgba::from_channels(0xFF, 0x69, 0xB4, 0xFF)),
            separated_party: SeparatedEspOption::off(Rgba::BLUE),
            separated_alliance: SeparatedEspOption::off(Rgba::from_channels(0x00, 0xBF, 0xFF, 0xFF)),
            separated_rank_one: SeparatedEspOption::off(Rgba::GOLD),
            separated_rank_two_and_six: SeparatedEspOption::off(Rgba::YELLOW),
            level_rendering: LevelRendering::default(),

            deep_dungeon: DeepDungeonOptions::default(),
            aggro: AggroRadiusOptions::default(),
            hitbox: HitboxOptions::default(),
            off_screen: OffScreenOptions::default(),

            color_override: BTreeMap::new(),
        }
    }
}

impl Configuration {
    /// The rule a [`RuleRef`] names.
    #[must_use]
    pub const fn rule(&self, rule: RuleRef) -> &EspOption {
        match rule {
            RuleRef::Kind(kind) => self.kind_option(kind),
            RuleRef::Zone(subtype) => self.deep_dungeon.option(subtype),
            RuleRef::YourPlayer => &self.separated_your_player.option,
            RuleRef::Friends => &self.separated_friends.option,
            RuleRef::Party => &self.separated_party.option,
            RuleRef::Alliance => &self.separated_alliance.option,
            RuleRef::RankOne => &self.separated_rank_one.option,
            RuleRef::RankTwoAndSix => &self.separated_rank_two_and_six.option,
            RuleRef::LevelBelow => &self.level_rendering.option,
        }
    }

    /// Mutable access to the rule a [`RuleRef`] names.
    pub fn rule_mut(&mut self, rule: RuleRef) -> &mut EspOption {
        match rule {
            RuleRef::Kind(kind) => self.kind_option_mut(kind),
            RuleRef::Zone(subtype) => self.deep_dungeon.option_mut(subtype),
            RuleRef::YourPlayer => &mut self.separated_your_player.option,
            RuleRef::Friends => &mut self.separated_friends.option,
            RuleRef::Party => &mut self.separated_party.option,
            RuleRef::Alliance => &mut self.separated_alliance.option,
            RuleRef::RankOne => &mut self.separated_rank_one.option,
            RuleRef::RankTwoAndSix => &mut self.separated_rank_two_and_six.option,
            RuleRef::LevelBelow => &mut self.level_rendering.option,
        }
    }

    /// Whether a separated category is switched on. Non-separated rules are always on.
    #[must_use]
    pub const fn is_separated_enabled(&self, rule: RuleRef) -> bool {
        match rule {
            RuleRef::YourPlayer => self.separated_your_player.enabled,
            RuleRef::Friends => self.separated_friends.enabled,
            RuleRef::Party => self.separated_party.enabled,
            RuleRef::Alliance => self.separated_alliance.enabled,
            RuleRef::RankOne => self.separated_rank_one.enabled,
            RuleRef::RankTwoAndSix => self.separated_rank_two_and_six.enabled,
            RuleRef::LevelBelow => self.level_rendering.enabled,
            RuleRef::Kind(_) | RuleRef::Zone(_) => true,
        }
    }

    const fn kind_option(&self, kind: KindRule) -> &EspOption {
        match kind {
            KindRule::Player => &self.player_option,
            KindRule::Npc => &self.npc_option,
            KindRule::EventNpc => &self.event_npc_option,
            KindRule::Treasure => &self.treasure_option,
            KindRule::Aetheryte => &self.aetheryte_option,
            KindRule::GatheringPoint => &self.gathering_point_option,
            KindRule::EventObj => &self.event_obj_option,
            KindRule::Mount => &self.mount_option,
            KindRule::Companion => &self.companion_option,
            KindRule::Retainer => &self.retainer_option,
            KindRule::Area => &self.area_option,
            KindRule::Housing => &self.housing_option,
            KindRule::Cutscene => &self.cutscene_option,
            KindRule::CardStand => &self.card_stand_option,
            KindRule::Ornament => &self.ornament_option,
        }
    }

    fn kind_option_mut(&mut self, kind: KindRule) -> &mut EspOption {
        match kind {
            KindRule::Player => &mut self.player_option,
            KindRule::Npc => &mut self.npc_option,
            KindRule::EventNpc => &mut self.event_npc_option,
            KindRule::Treasure => &mut self.treasure_option,
            KindRule::Aetheryte => &mut self.aetheryte_option,
            KindRule::GatheringPoint => &mut self.gathering_point_option,
            KindRule::EventObj => &mut self.event_obj_option,
            KindRule::Mount => &mut self.mount_option,
            KindRule::Companion => &mut self.companion_option,
            KindRule::Retainer => &mut self.retainer_option,
            KindRule::Area => &mut self.area_option,
            KindRule::Housing => &mut self.housing_option,
            KindRule::Cutscene => &mut self.cutscene_option,
            KindRule::CardStand => &mut self.card_stand_option,
            KindRule::Ornament => &mut self.ornament_option,
        }
    }

    /// `true` if the data-id is on the user block-list.
    #[inline]
    #[must_use]
    pub fn is_user_blocked(&self, data_id: u32) -> bool {
        self.data_id_ignore_list.contains(&data_id)
    }
}

/// TOML tables only take string keys; data-ids are written as decimal strings.
mod data_id_keys {
    use std::collections::BTreeMap;

    use radar_shared::Rgba;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(map: &BTreeMap<u32, Rgba>, serializer: S) -> Result<S::Ok, S::Error> {
        let keyed: BTreeMap<String, Rgba> = map.iter().map(|(id, c)| (id.to_string(), *c)).collect();
        keyed.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<u32, Rgba>, D::Error> {
        BTreeMap::<String, Rgba>::deserialize(deserializer)?
            .into_iter()
            .map(|(key, color)| {
                key.parse::<u32>()
                    .map(|id| (id, color))
                    .map_err(|_| D::Error::custom(format!("invalid data id key `{key}`")))
            })
            .collect()
    }
}
