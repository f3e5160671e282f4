//! # Rule Resolver
//!
//! Pure classification: `(entity, configuration, catalog, zone context)`
//! → eligibility, one display rule, a final color and a label.
//!
//! Both decisions are ordered tables evaluated top to bottom:
//!
//! ```text
//!   ELIGIBILITY_CLAUSES               RULE_TIERS
//!   ───────────────────               ──────────
//!   validity                          zone-subtype
//!   block-list                        your-player ─┐
//!   show-all                          friends      │ Player
//!   max-distance                      party        │
//!   visibility                        alliance     │
//!   special-zone                      player ──────┘
//!   normal                            rank-one ────┐
//!   (eligible)                        rank-two-six │ BattleNpc
//!                                     companion    │
//!                                     level-below  │
//!                                     npc ─────────┘
//!                                     kind
//! ```
//!
//! The color override table is applied last and replaces only the color.
//! A miss in any lookup table falls through to the next tier.

use radar_shared::constants::NAMELESS_PLACEHOLDER;
use radar_shared::Rgba;
use tracing::error;

use crate::catalog::{Catalog, ZoneSubtype};
use crate::config::{Configuration, EspOption, KindRule, RuleRef};
use crate::entity::{BattleNpcSubKind, Entity, ObjectKind, Relationship};
use crate::kind::KindProfile;
use crate::source::ZoneContext;

// =============================================================================
// ELIGIBILITY
// =============================================================================

/// Why an entity is not displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ineligible {
    /// Source reported the entity invalid.
    Invalid,
    /// Data-id is on the system or user block-list.
    Blocked,
    /// Farther than the configured maximum distance.
    TooFar,
    /// The host does not render it and only visible entities are shown.
    RenderSuppressed,
    /// Blank name and nameless entities are hidden.
    Nameless,
    /// Special zone: battle NPC is not hostile.
    NotHostile,
    /// Dead battle character.
    Dead,
    /// Special zone: the default-enemy rule is switched off.
    ZoneEnemyDisabled,
}

/// Outcome of the eligibility clauses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Eligibility {
    /// Passes every filter.
    Eligible,
    /// Filtered out.
    Ineligible(Ineligible),
}

impl Eligibility {
    /// `true` for [`Eligibility::Eligible`].
    #[inline]
    #[must_use]
    pub const fn is_eligible(self) -> bool {
        matches!(self, Self::Eligible)
    }
}

type Clause = fn(&Resolver<'_>, &Entity) -> Option<Eligibility>;

/// First clause returning `Some` decides.
const ELIGIBILITY_CLAUSES: [Clause; 7] = [
    validity_clause,
    block_list_clause,
    show_all_clause,
    max_distance_clause,
    visibility_clause,
    special_zone_clause,
    normal_clause,
];

fn validity_clause(_: &Resolver<'_>, entity: &Entity) -> Option<Eligibility> {
    (!entity.valid).then_some(Eligibility::Ineligible(Ineligible::Invalid))
}

fn block_list_clause(r: &Resolver<'_>, entity: &Entity) -> Option<Eligibility> {
    let id = entity.data_id;
    let blocked = id != 0 && (r.catalog.is_blocked(id) || r.config.is_user_blocked(id));
    blocked.then_some(Eligibility::Ineligible(Ineligible::Blocked))
}

fn show_all_clause(r: &Resolver<'_>, _: &Entity) -> Option<Eligibility> {
    r.config.debug_mode.then_some(Eligibility::Eligible)
}

fn max_distance_clause(r: &Resolver<'_>, entity: &Entity) -> Option<Eligibility> {
    if !r.config.use_max_distance {
        return None;
    }
    let local = r.ctx.local_player?;
    (local.position.distance(entity.position) > r.config.max_distance)
        .then_some(Eligibility::Ineligible(Ineligible::TooFar))
}

fn visibility_clause(r: &Resolver<'_>, entity: &Entity) -> Option<Eligibility> {
    if !r.config.show_only_visible || entity.render_visible {
        return None;
    }
    let player_override = r.config.override_show_invisible_players && entity.kind == ObjectKind::Player;
    (!player_override).then_some(Eligibility::Ineligible(Ineligible::RenderSuppressed))
}

fn special_zone_clause(r: &Resolver<'_>, entity: &Entity) -> Option<Eligibility> {
    if !r.zone_special_active() {
        return None;
    }
    if r.catalog.zone_subtype(entity.data_id).is_some() {
        return Some(Eligibility::Eligible);
    }
    if entity.is_nameless() && !r.config.show_nameless {
        return Some(Eligibility::Ineligible(Ineligible::Nameless));
    }
    if entity.kind != ObjectKind::BattleNpc {
        return Some(Eligibility::Eligible);
    }
    let verdict = if entity.sub_kind != BattleNpcSubKind::Enemy {
        Eligibility::Ineligible(Ineligible::NotHostile)
    } else if entity.is_dead {
        Eligibility::Ineligible(Ineligible::Dead)
    } else if !r.config.deep_dungeon.default_enemy.enabled {
        Eligibility::Ineligible(Ineligible::ZoneEnemyDisabled)
    } else {
        Eligibility::Eligible
    };
    Some(verdict)
}

fn normal_clause(r: &Resolver<'_>, entity: &Entity) -> Option<Eligibility> {
    if entity.is_nameless() && !r.config.show_nameless {
        return Some(Eligibility::Ineligible(Ineligible::Nameless));
    }
    (entity.is_dead && entity.kind.is_battle_chara()).then_some(Eligibility::Ineligible(Ineligible::Dead))
}

// =============================================================================
// RULE TIERS
// =============================================================================

/// One row of the rule-priority table.
#[derive(Clone, Copy)]
struct RuleTier {
    name: &'static str,
    select: fn(&Resolver<'_>, &Entity) -> Option<RuleRef>,
}

/// Highest precedence first. The final `kind` tier always matches.
const RULE_TIERS: [RuleTier; 12] = [
    RuleTier { name: "zone-subtype", select: zone_subtype_tier },
    RuleTier { name: "your-player", select: your_player_tier },
    RuleTier { name: "friends", select: friends_tier },
    RuleTier { name: "party", select: party_tier },
    RuleTier { name: "alliance", select: alliance_tier },
    RuleTier { name: "player", select: player_tier },
    RuleTier { name: "rank-one", select: rank_one_tier },
    RuleTier { name: "rank-two-six", select: rank_two_six_tier },
    RuleTier { name: "companion", select: companion_tier },
    RuleTier { name: "level-below", select: level_below_tier },
    RuleTier { name: "npc", select: npc_tier },
    RuleTier { name: "kind", select: kind_tier },
];

fn zone_subtype_tier(r: &Resolver<'_>, entity: &Entity) -> Option<RuleRef> {
    if !r.zone_special_active() {
        return None;
    }
    match r.catalog.zone_subtype(entity.data_id) {
        Some(subtype) => Some(RuleRef::Zone(subtype)),
        None if is_hostile_npc(entity) => Some(RuleRef::Zone(ZoneSubtype::Default)),
        None => None,
    }
}

fn separated_player(r: &Resolver<'_>, entity: &Entity, rule: RuleRef, matches: bool) -> Option<RuleRef> {
    (entity.kind == ObjectKind::Player && matches && r.config.is_separated_enabled(rule)).then_some(rule)
}

fn your_player_tier(r: &Resolver<'_>, entity: &Entity) -> Option<RuleRef> {
    separated_player(r, entity, RuleRef::YourPlayer, r.ctx.is_local_player(entity))
}

fn friends_tier(r: &Resolver<'_>, entity: &Entity) -> Option<RuleRef> {
    separated_player(r, entity, RuleRef::Friends, entity.relationship.contains(Relationship::FRIEND))
}

fn party_tier(r: &Resolver<'_>, entity: &Entity) -> Option<RuleRef> {
    separated_player(r, entity, RuleRef::Party, entity.relationship.contains(Relationship::PARTY_MEMBER))
}

fn alliance_tier(r: &Resolver<'_>, entity: &Entity) -> Option<RuleRef> {
    let matches = entity.relationship.contains(Relationship::ALLIANCE_MEMBER);
    separated_player(r, entity, RuleRef::Alliance, matches)
}

fn player_tier(_: &Resolver<'_>, entity: &Entity) -> Option<RuleRef> {
    (entity.kind == ObjectKind::Player).then_some(RuleRef::Kind(KindRule::Player))
}

fn battle_npc_rank(r: &Resolver<'_>, entity: &Entity) -> Option<u8> {
    if entity.kind == ObjectKind::BattleNpc {
        r.catalog.rank(entity.data_id)
    } else {
        None
    }
}

fn rank_one_tier(r: &Resolver<'_>, entity: &Entity) -> Option<RuleRef> {
    let matches = battle_npc_rank(r, entity) == Some(1);
    (matches && r.config.is_separated_enabled(RuleRef::RankOne)).then_some(RuleRef::RankOne)
}

fn rank_two_six_tier(r: &Resolver<'_>, entity: &Entity) -> Option<RuleRef> {
    let matches = matches!(battle_npc_rank(r, entity), Some(2 | 6));
    (matches && r.config.is_separated_enabled(RuleRef::RankTwoAndSix)).then_some(RuleRef::RankTwoAndSix)
}

fn companion_tier(_: &Resolver<'_>, entity: &Entity) -> Option<RuleRef> {
    (entity.kind == ObjectKind::BattleNpc && entity.sub_kind.is_companion())
        .then_some(RuleRef::Kind(KindRule::Companion))
}

fn level_below_tier(r: &Resolver<'_>, entity: &Entity) -> Option<RuleRef> {
    if entity.kind != ObjectKind::BattleNpc || !r.config.level_rendering.enabled {
        return None;
    }
    let local = r.ctx.local_player?;
    let threshold = i16::from(local.level) - i16::from(r.config.level_rendering.relative_level);
    (threshold > i16::from(entity.level)).then_some(RuleRef::LevelBelow)
}

fn npc_tier(_: &Resolver<'_>, entity: &Entity) -> Option<RuleRef> {
    (entity.kind == ObjectKind::BattleNpc).then_some(RuleRef::Kind(KindRule::Npc))
}

fn kind_tier(_: &Resolver<'_>, entity: &Entity) -> Option<RuleRef> {
    if entity.kind == ObjectKind::None {
        error!(
            object_id = entity.object_id,
            data_id = entity.data_id,
            "Entity without a kind reached rule resolution, using NPC rule"
        );
    }
    Some(RuleRef::Kind(KindProfile::of(entity.kind).rule))
}

fn is_hostile_npc(entity: &Entity) -> bool {
    entity.kind == ObjectKind::BattleNpc && entity.sub_kind == BattleNpcSubKind::Enemy
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Fully resolved display decision for one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Eligibility verdict.
    pub eligibility: Eligibility,
    /// Which configured rule was selected.
    pub rule_ref: RuleRef,
    /// Name of the tier that selected it.
    pub tier: &'static str,
    /// The rule, with the final color applied.
    pub rule: EspOption,
    /// Display label.
    pub label: String,
}

impl Resolution {
    /// Final marker color.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.rule.color
    }

    /// Eligible and the resolved rule is enabled.
    #[inline]
    #[must_use]
    pub const fn is_displayed(&self) -> bool {
        self.eligibility.is_eligible() && self.rule.enabled
    }
}

/// Resolver bound to one configuration version and one zone context.
///
/// Cheap to build; the refresh loop creates one per cycle.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    config: &'a Configuration,
    catalog: &'a Catalog,
    ctx: &'a ZoneContext,
}

impl<'a> Resolver<'a> {
    /// Binds the inputs shared by every entity of a batch.
    #[must_use]
    pub const fn new(config: &'a Configuration, catalog: &'a Catalog, ctx: &'a ZoneContext) -> Self {
        Self { config, catalog, ctx }
    }

    #[inline]
    const fn zone_special_active(&self) -> bool {
        self.config.show_zone_special && self.ctx.is_special_zone
    }

    /// Runs the eligibility clauses.
    #[must_use]
    pub fn eligibility(&self, entity: &Entity) -> Eligibility {
        ELIGIBILITY_CLAUSES
            .iter()
            .find_map(|clause| clause(self, entity))
            .unwrap_or(Eligibility::Eligible)
    }

    /// Selects the most specific configured rule and the tier that chose it.
    #[must_use]
    pub fn select_rule(&self, entity: &Entity) -> (RuleRef, &'static str) {
        RULE_TIERS
            .iter()
            .find_map(|tier| (tier.select)(self, entity).map(|rule| (rule, tier.name)))
            .unwrap_or((RuleRef::Kind(KindRule::Npc), "kind"))
    }

    /// Builds the display label. `rule` is the resolved rule.
    #[must_use]
    pub fn label(&self, entity: &Entity, rule: &EspOption) -> String {
        if self.config.debug_text {
            return format!("{}, {}, {:?}", entity.name, entity.data_id, entity.kind);
        }

        let base = self
            .ctx
            .is_special_zone
            .then(|| self.catalog.rename(entity.data_id))
            .flatten()
            .unwrap_or_else(|| {
                if entity.is_nameless() {
                    NAMELESS_PLACEHOLDER
                } else {
                    entity.name.as_str()
                }
            });

        let mut label = String::with_capacity(base.len() + 12);
        if self.config.rank_text {
            if let Some(rank) = battle_npc_rank(self, entity) {
                label.push_str(&format!("[R{rank}] "));
            }
        }
        label.push_str(base);
        if rule.append_level && entity.kind.is_battle_chara() {
            label.push_str(&format!(" Lv{}", entity.level));
        }
        label
    }

    /// Resolves eligibility, rule, color and label.
    #[must_use]
    pub fn resolve(&self, entity: &Entity) -> Resolution {
        let eligibility = self.eligibility(entity);
        let (rule_ref, tier) = self.select_rule(entity);

        let mut rule = self.config.rule(rule_ref).clone();
        if let Some(color) = self.config.color_override.get(&entity.data_id) {
            rule.color = *color;
        }
        if self.config.debug_mode {
            rule.enabled = true;
        }
        if rule.display_type.shows_health() && !KindProfile::of(entity.kind).draw.health {
            error!(
                data_id = entity.data_id,
                kind = ?entity.kind,
                display_type = ?rule.display_type,
                "Health display selected for a kind without health"
            );
            rule.display_type = rule.display_type.without_health();
        }

        let label = self.label(entity, &rule);
        Resolution { eligibility, rule_ref, tier, rule, label }
    }
}

/// Resolves one entity.
#[must_use]
pub fn resolve(entity: &Entity, config: &Configuration, catalog: &Catalog, ctx: &ZoneContext) -> Resolution {
    Resolver::new(config, catalog, ctx).resolve(entity)
}

/// Runs only the eligibility clauses.
#[must_use]
pub fn is_eligible(entity: &Entity, config: &Configuration, catalog: &Catalog, ctx: &ZoneContext) -> Eligibility {
    Resolver::new(config, catalog, ctx).eligibility(entity)
}

/// Label for an entity under its resolved rule.
#[must_use]
pub fn resolve_label(
    entity: &Entity,
    config: &Configuration,
    catalog: &Catalog,
    ctx: &ZoneContext,
    rule: &EspOption,
) -> String {
    Resolver::new(config, catalog, ctx).label(entity, rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayType;
    use crate::source::LocalPlayer;
    use radar_shared::Vec3;

    const LOCAL_ID: u64 = 0x1000;

    fn local(level: u8) -> Option<LocalPlayer> {
        Some(LocalPlayer { object_id: LOCAL_ID, level, position: Vec3::ZERO })
    }

    fn normal() -> ZoneContext {
        ZoneContext::normal(local(90))
    }

    fn special() -> ZoneContext {
        ZoneContext::special(local(90))
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.extend_ranks([(500, 1), (600, 2), (606, 6)]);
        catalog.insert_zone_subtype(2_007_358, ZoneSubtype::GoldChest);
        catalog.insert_zone_subtype(7_000, ZoneSubtype::Mimic);
        catalog.insert_rename(2_007_358, "Gold Coffer");
        catalog.insert_blocked(9_999);
        catalog
    }

    fn goblin() -> Entity {
        Entity::new(1, ObjectKind::BattleNpc, "Goblin")
            .with_data_id(500)
            .with_sub_kind(BattleNpcSubKind::Enemy)
            .with_level(1)
            .with_health(100, 100)
    }

    fn player(id: u64, name: &str) -> Entity {
        Entity::new(id, ObjectKind::Player, name).with_level(90).with_health(1, 1)
    }

    fn all_separated_on() -> Configuration {
        let mut cfg = Configuration::default();
        cfg.separated_your_player.enabled = true;
        cfg.separated_friends.enabled = true;
        cfg.separated_party.enabled = true;
        cfg.separated_alliance.enabled = true;
        cfg
    }

    // ---------------------------------------------------------------------
    // Scenarios
    // ---------------------------------------------------------------------

    #[test]
    fn test_rank_one_goblin_resolves_gold() {
        let mut cfg = Configuration::default();
        cfg.separated_rank_one.enabled = true;
        cfg.separated_rank_one.option.color = Rgba::GOLD;
        // Would also match the level threshold
        cfg.level_rendering.enabled = true;

        let res = resolve(&goblin(), &cfg, &catalog(), &normal());

        assert_eq!(res.eligibility, Eligibility::Eligible);
        assert_eq!(res.rule_ref, RuleRef::RankOne);
        assert_eq!(res.color(), Rgba::GOLD);
        assert!(res.is_displayed());
    }

    #[test]
    fn test_nameless_player_hidden() {
        let cfg = Configuration { show_nameless: false, ..Configuration::default() };
        let e = player(2, "");
        assert_eq!(
            is_eligible(&e, &cfg, &catalog(), &normal()),
            Eligibility::Ineligible(Ineligible::Nameless)
        );
    }

    #[test]
    fn test_color_override_replaces_only_color() {
        let e = Entity::new(3, ObjectKind::BattleNpc, "Ahriman")
            .with_data_id(42)
            .with_sub_kind(BattleNpcSubKind::Enemy);
        let mut cfg = Configuration::default();
        cfg.npc_option.color = Rgba(0xFFFF_FFFF);

        let plain = resolve(&e, &cfg, &catalog(), &normal());
        cfg.color_override.insert(42, Rgba(0xFF00_FF00));
        let overridden = resolve(&e, &cfg, &catalog(), &normal());

        assert_eq!(plain.rule_ref, RuleRef::Kind(KindRule::Npc));
        assert_eq!(plain.color(), Rgba(0xFFFF_FFFF));
        assert_eq!(overridden.color(), Rgba(0xFF00_FF00));
        assert_eq!(overridden.rule, EspOption { color: Rgba(0xFF00_FF00), ..cfg.npc_option.clone() });
        assert_eq!(overridden.rule_ref, plain.rule_ref);
        assert_eq!(overridden.label, plain.label);
        assert_eq!(overridden.eligibility, plain.eligibility);
    }

    #[test]
    fn test_gold_chest_rule_regardless_of_kind() {
        let cfg = Configuration::default();
        for kind in [ObjectKind::Treasure, ObjectKind::EventObj, ObjectKind::BattleNpc, ObjectKind::Player] {
            let e = Entity::new(4, kind, "").with_data_id(2_007_358);
            let res = resolve(&e, &cfg, &catalog(), &special());
            assert_eq!(res.rule, cfg.deep_dungeon.gold_chest, "{kind:?}");
            assert_eq!(res.eligibility, Eligibility::Eligible, "{kind:?}");
            assert_eq!(res.label, "Gold Coffer");
        }
    }

    // ---------------------------------------------------------------------
    // Properties
    // ---------------------------------------------------------------------

    #[test]
    fn test_blocked_never_eligible() {
        let catalog = catalog();
        let entities = [
            goblin().with_data_id(9_999),
            player(5, "Blocked Player").with_data_id(9_999),
            Entity::new(6, ObjectKind::Treasure, "").with_data_id(9_999),
            goblin().with_data_id(1_234),
            Entity::new(7, ObjectKind::EventObj, "x").with_data_id(1_234).hidden(),
        ];
        for debug_mode in [false, true] {
            for show_nameless in [false, true] {
                for show_zone_special in [false, true] {
                    for ctx in [normal(), special()] {
                        let mut cfg = Configuration {
                            debug_mode,
                            show_nameless,
                            show_zone_special,
                            show_only_visible: false,
                            ..Configuration::default()
                        };
                        cfg.data_id_ignore_list.insert(1_234);
                        for e in &entities {
                            assert_eq!(
                                is_eligible(e, &cfg, &catalog, &ctx),
                                Eligibility::Ineligible(Ineligible::Blocked),
                                "{e:?}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_data_id_zero_never_blocked() {
        let mut catalog = catalog();
        catalog.insert_blocked(0);
        let mut cfg = Configuration::default();
        cfg.data_id_ignore_list.insert(0);
        let e = goblin().with_data_id(0);
        assert!(is_eligible(&e, &cfg, &catalog, &normal()).is_eligible());
    }

    #[test]
    fn test_resolution_is_deterministic_and_order_independent() {
        let mut cfg = all_separated_on();
        cfg.separated_rank_one.enabled = true;
        cfg.level_rendering.enabled = true;
        cfg.color_override.insert(606, Rgba::BLUE);
        let catalog = catalog();
        let ctx = normal();

        let batch = vec![
            goblin(),
            goblin().with_data_id(606),
            player(LOCAL_ID, "Me").with_relationship(Relationship::PARTY_MEMBER),
            player(9, "Friend").with_relationship(Relationship::FRIEND),
            Entity::new(10, ObjectKind::Treasure, "Coffer"),
            Entity::new(11, ObjectKind::BattleNpc, "Carbuncle").with_sub_kind(BattleNpcSubKind::Pet),
        ];

        let forward: Vec<_> = batch.iter().map(|e| resolve(e, &cfg, &catalog, &ctx)).collect();
        let mut backward: Vec<_> = batch.iter().rev().map(|e| resolve(e, &cfg, &catalog, &ctx)).collect();
        backward.reverse();
        assert_eq!(forward, backward);

        for e in &batch {
            assert_eq!(resolve(e, &cfg, &catalog, &ctx), resolve(e, &cfg, &catalog, &ctx));
        }
    }

    #[test]
    fn test_player_category_priority() {
        let cfg = all_separated_on();
        let catalog = catalog();
        let ctx = normal();

        let me = player(LOCAL_ID, "Me").with_relationship(Relationship::PARTY_MEMBER | Relationship::FRIEND);
        assert_eq!(resolve(&me, &cfg, &catalog, &ctx).rule_ref, RuleRef::YourPlayer);

        let friend = player(20, "F").with_relationship(Relationship::FRIEND | Relationship::PARTY_MEMBER);
        assert_eq!(resolve(&friend, &cfg, &catalog, &ctx).rule_ref, RuleRef::Friends);

        let party = player(21, "P").with_relationship(Relationship::PARTY_MEMBER | Relationship::ALLIANCE_MEMBER);
        assert_eq!(resolve(&party, &cfg, &catalog, &ctx).rule_ref, RuleRef::Party);

        let stranger = player(22, "S");
        assert_eq!(resolve(&stranger, &cfg, &catalog, &ctx).rule_ref, RuleRef::Kind(KindRule::Player));
    }

    #[test]
    fn test_disabled_category_falls_through() {
        let mut cfg = all_separated_on();
        cfg.separated_party.enabled = false;
        let e = player(23, "P").with_relationship(Relationship::PARTY_MEMBER | Relationship::ALLIANCE_MEMBER);
        let res = resolve(&e, &cfg, &catalog(), &normal());
        assert_eq!(res.rule_ref, RuleRef::Alliance);
        assert_eq!(res.tier, "alliance");
    }

    #[test]
    fn test_rank_one_beats_level_threshold() {
        let mut cfg = Configuration::default();
        cfg.separated_rank_one.enabled = true;
        cfg.level_rendering.enabled = true;
        cfg.level_rendering.relative_level = 5;
        let res = resolve(&goblin().with_level(10), &cfg, &catalog(), &normal());
        assert_eq!(res.rule_ref, RuleRef::RankOne);

        cfg.separated_rank_one.enabled = false;
        let res = resolve(&goblin().with_level(10), &cfg, &catalog(), &normal());
        assert_eq!(res.rule_ref, RuleRef::LevelBelow);
    }

    // ---------------------------------------------------------------------
    // Battle NPC tiers
    // ---------------------------------------------------------------------

    #[test]
    fn test_rank_two_and_six() {
        let mut cfg = Configuration::default();
        cfg.separated_rank_two_and_six.enabled = true;
        for id in [600, 606] {
            let res = resolve(&goblin().with_data_id(id), &cfg, &catalog(), &normal());
            assert_eq!(res.rule_ref, RuleRef::RankTwoAndSix);
        }
    }

    #[test]
    fn test_pets_use_companion_rule() {
        let cfg = Configuration::default();
        for sub in [BattleNpcSubKind::Pet, BattleNpcSubKind::Chocobo] {
            let e = Entity::new(30, ObjectKind::BattleNpc, "Buddy").with_sub_kind(sub);
            let res = resolve(&e, &cfg, &catalog(), &normal());
            assert_eq!(res.rule_ref, RuleRef::Kind(KindRule::Companion));
        }
    }

    #[test]
    fn test_level_threshold_boundary() {
        let mut cfg = Configuration::default();
        cfg.level_rendering.enabled = true;
        cfg.level_rendering.relative_level = 10;
        let catalog = catalog();
        let ctx = normal(); // local level 90

        let low = goblin().with_data_id(1).with_level(79);
        assert_eq!(resolve(&low, &cfg, &catalog, &ctx).rule_ref, RuleRef::LevelBelow);

        let edge = goblin().with_data_id(1).with_level(80);
        assert_eq!(resolve(&edge, &cfg, &catalog, &ctx).rule_ref, RuleRef::Kind(KindRule::Npc));

        // No local player: threshold cannot apply
        let res = resolve(&low, &cfg, &catalog, &ZoneContext::normal(None));
        assert_eq!(res.rule_ref, RuleRef::Kind(KindRule::Npc));
    }

    #[test]
    fn test_kind_table_mapping() {
        let cfg = Configuration::default();
        let res = resolve(&Entity::new(31, ObjectKind::Aetheryte, "Aetheryte"), &cfg, &catalog(), &normal());
        assert_eq!(res.rule_ref, RuleRef::Kind(KindRule::Aetheryte));
        let res = resolve(&Entity::new(32, ObjectKind::MountType, "Mount"), &cfg, &catalog(), &normal());
        assert_eq!(res.rule_ref, RuleRef::Kind(KindRule::Mount));
        let res = resolve(&Entity::new(33, ObjectKind::None, "???"), &cfg, &catalog(), &normal());
        assert_eq!(res.rule_ref, RuleRef::Kind(KindRule::Npc));
    }

    // ---------------------------------------------------------------------
    // Eligibility clauses
    // ---------------------------------------------------------------------

    #[test]
    fn test_invalid_entity() {
        let mut e = goblin();
        e.valid = false;
        let cfg = Configuration { debug_mode: true, ..Configuration::default() };
        assert_eq!(is_eligible(&e, &cfg, &catalog(), &normal()), Eligibility::Ineligible(Ineligible::Invalid));
    }

    #[test]
    fn test_show_only_visible_with_player_override() {
        let mut cfg = Configuration { show_only_visible: true, ..Configuration::default() };
        let hidden_player = player(40, "Ghost").hidden();
        let hidden_npc = goblin().with_data_id(1).hidden();
        let c = catalog();

        assert_eq!(
            is_eligible(&hidden_player, &cfg, &c, &normal()),
            Eligibility::Ineligible(Ineligible::RenderSuppressed)
        );

        cfg.override_show_invisible_players = true;
        assert!(is_eligible(&hidden_player, &cfg, &c, &normal()).is_eligible());
        assert_eq!(
            is_eligible(&hidden_npc, &cfg, &c, &normal()),
            Eligibility::Ineligible(Ineligible::RenderSuppressed)
        );

        cfg.show_only_visible = false;
        assert!(is_eligible(&hidden_npc, &cfg, &c, &normal()).is_eligible());
    }

    #[test]
    fn test_visibility_filter_applies_in_special_zone() {
        let cfg = Configuration::default();
        let chest = Entity::new(41, ObjectKind::Treasure, "").with_data_id(2_007_358).hidden();
        assert_eq!(
            is_eligible(&chest, &cfg, &catalog(), &special()),
            Eligibility::Ineligible(Ineligible::RenderSuppressed)
        );
    }

    #[test]
    fn test_dead_battle_chara_hidden() {
        let cfg = Configuration::default();
        let c = catalog();
        assert_eq!(is_eligible(&goblin().dead(), &cfg, &c, &normal()), Eligibility::Ineligible(Ineligible::Dead));
        assert_eq!(
            is_eligible(&player(42, "Fallen").dead(), &cfg, &c, &normal()),
            Eligibility::Ineligible(Ineligible::Dead)
        );
        // Dead flag is meaningless for other kinds
        let mut coffer = Entity::new(43, ObjectKind::Treasure, "Coffer");
        coffer.is_dead = true;
        assert!(is_eligible(&coffer, &cfg, &c, &normal()).is_eligible());
    }

    #[test]
    fn test_show_all_forces_enabled() {
        let cfg = Configuration { debug_mode: true, ..Configuration::default() };
        let e = Entity::new(44, ObjectKind::Housing, "").dead().hidden();
        let res = resolve(&e, &cfg, &catalog(), &normal());
        assert_eq!(res.eligibility, Eligibility::Eligible);
        assert!(!cfg.housing_option.enabled);
        assert!(res.rule.enabled);
    }

    #[test]
    fn test_special_zone_battle_npc_rules() {
        let mut cfg = Configuration::default();
        let c = catalog();
        let ctx = special();
        let enemy = goblin().with_data_id(1);

        let res = resolve(&enemy, &cfg, &c, &ctx);
        assert_eq!(res.eligibility, Eligibility::Eligible);
        assert_eq!(res.rule_ref, RuleRef::Zone(ZoneSubtype::Default));

        let pet = enemy.clone().with_sub_kind(BattleNpcSubKind::Pet);
        assert_eq!(is_eligible(&pet, &cfg, &c, &ctx), Eligibility::Ineligible(Ineligible::NotHostile));

        assert_eq!(is_eligible(&enemy.clone().dead(), &cfg, &c, &ctx), Eligibility::Ineligible(Ineligible::Dead));

        cfg.deep_dungeon.default_enemy.enabled = false;
        assert_eq!(is_eligible(&enemy, &cfg, &c, &ctx), Eligibility::Ineligible(Ineligible::ZoneEnemyDisabled));

        // Known subtype is eligible even when dead or nameless
        let mimic = Entity::new(45, ObjectKind::BattleNpc, "").with_data_id(7_000).dead();
        let res = resolve(&mimic, &cfg, &c, &ctx);
        assert_eq!(res.eligibility, Eligibility::Eligible);
        assert_eq!(res.rule_ref, RuleRef::Zone(ZoneSubtype::Mimic));
    }

    #[test]
    fn test_special_zone_other_kinds() {
        let cfg = Configuration::default();
        let c = catalog();
        let obj = Entity::new(46, ObjectKind::EventObj, "Lever");
        let res = resolve(&obj, &cfg, &c, &special());
        assert!(res.eligibility.is_eligible());
        assert_eq!(res.rule_ref, RuleRef::Kind(KindRule::EventObj));

        let nameless = Entity::new(47, ObjectKind::EventObj, "");
        assert_eq!(is_eligible(&nameless, &cfg, &c, &special()), Eligibility::Ineligible(Ineligible::Nameless));
    }

    #[test]
    fn test_zone_special_toggle_off_uses_normal_rules() {
        let cfg = Configuration { show_zone_special: false, ..Configuration::default() };
        let chest = Entity::new(48, ObjectKind::Treasure, "Coffer").with_data_id(2_007_358);
        let res = resolve(&chest, &cfg, &catalog(), &special());
        assert_eq!(res.rule_ref, RuleRef::Kind(KindRule::Treasure));
    }

    #[test]
    fn test_max_distance() {
        let cfg = Configuration { use_max_distance: true, max_distance: 30.0, ..Configuration::default() };
        let c = catalog();
        let near = goblin().with_data_id(1).at(Vec3::new(10.0, 0.0, 0.0));
        let far = goblin().with_data_id(1).at(Vec3::new(0.0, 0.0, 31.0));
        assert!(is_eligible(&near, &cfg, &c, &normal()).is_eligible());
        assert_eq!(is_eligible(&far, &cfg, &c, &normal()), Eligibility::Ineligible(Ineligible::TooFar));
    }

    // ---------------------------------------------------------------------
    // Rule fields and labels
    // ---------------------------------------------------------------------

    #[test]
    fn test_disabled_kind_rule_not_displayed() {
        let cfg = Configuration::default();
        let res = resolve(&Entity::new(50, ObjectKind::Retainer, "Ret"), &cfg, &catalog(), &normal());
        assert!(res.eligibility.is_eligible());
        assert!(!res.is_displayed());
    }

    #[test]
    fn test_health_display_downgraded_for_healthless_kind() {
        let mut cfg = Configuration::default();
        cfg.treasure_option = EspOption::new(Rgba::GOLD, DisplayType::HealthBarAndName);
        let res = resolve(&Entity::new(51, ObjectKind::Treasure, "Coffer"), &cfg, &catalog(), &normal());
        assert_eq!(res.rule.display_type, DisplayType::DotAndName);
        assert_eq!(res.color(), Rgba::GOLD);
    }

    #[test]
    fn test_labels() {
        let cfg = Configuration::default();
        let c = catalog();
        let rule = EspOption::default();

        let unnamed = Entity::new(60, ObjectKind::Treasure, " ");
        assert_eq!(resolve_label(&unnamed, &cfg, &c, &normal(), &rule), NAMELESS_PLACEHOLDER);

        let chest = Entity::new(61, ObjectKind::Treasure, "treasure coffer").with_data_id(2_007_358);
        assert_eq!(resolve_label(&chest, &cfg, &c, &normal(), &rule), "treasure coffer");
        assert_eq!(resolve_label(&chest, &cfg, &c, &special(), &rule), "Gold Coffer");

        let debug = Configuration { debug_text: true, ..Configuration::default() };
        assert_eq!(resolve_label(&chest, &debug, &c, &special(), &rule), "treasure coffer, 2007358, Treasure");
    }

    #[test]
    fn test_label_rank_and_level() {
        let cfg = Configuration { rank_text: true, ..Configuration::default() };
        let rule = EspOption { append_level: true, ..EspOption::default() };
        let label = resolve_label(&goblin().with_level(7), &cfg, &catalog(), &normal(), &rule);
        assert_eq!(label, "[R1] Goblin Lv7");

        // Level is only appended to battle characters
        let aetheryte = Entity::new(62, ObjectKind::Aetheryte, "Aetheryte").with_data_id(500);
        assert_eq!(resolve_label(&aetheryte, &cfg, &catalog(), &normal(), &rule), "Aetheryte");
    }
}
