//! # Static Lookup Catalog
//!
//! Data-id keyed tables loaded once at startup:
//!
//! - special-zone territory ids
//! - data-id → zone subtype
//! - data-id → special-zone display name
//! - system block-list
//! - data-id → rank
//!
//! A miss in any table is never an error; callers fall through to the
//! next rule tier.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{RadarError, RadarResult};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.toml");

/// Entity subtype inside a special zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneSubtype {
    /// Any hostile enemy without a more specific mapping.
    Default,
    /// Undead enemies.
    SpecialUndead,
    /// Auspice enemies.
    Auspice,
    /// Easy mobs.
    EasyMobs,
    /// Traps.
    Traps,
    /// Cairn / beacon / pylon of return.
    Return,
    /// Cairn / beacon / pylon of passage.
    Passage,
    /// Gold coffer.
    GoldChest,
    /// Silver coffer.
    SilverChest,
    /// Bronze coffer.
    BronzeChest,
    /// Accursed hoard.
    AccursedHoard,
    /// Mimic.
    Mimic,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    special_territories: Vec<u16>,
    #[serde(default)]
    blocked: Vec<u32>,
    #[serde(default)]
    zone_subtype: Vec<SubtypeEntry>,
    #[serde(default)]
    rename: Vec<RenameEntry>,
    #[serde(default)]
    rank: Vec<RankEntry>,
}

#[derive(Deserialize)]
struct SubtypeEntry {
    subtype: ZoneSubtype,
    data_ids: Vec<u32>,
}

#[derive(Deserialize)]
struct RenameEntry {
    data_id: u32,
    name: String,
}

#[derive(Deserialize)]
struct RankEntry {
    rank: u8,
    data_ids: Vec<u32>,
}

/// Static data-id lookup tables.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    special_territories: HashSet<u16>,
    blocked: HashSet<u32>,
    zone_subtypes: HashMap<u32, ZoneSubtype>,
    renames: HashMap<u32, String>,
    ranks: HashMap<u32, u8>,
}

impl Catalog {
    /// The catalog embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::Catalog`] if the embedded data is malformed.
    pub fn builtin() -> RadarResult<Self> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::Catalog`] on malformed input or when a data-id
    /// is mapped to two different subtypes.
    pub fn from_toml(text: &str) -> RadarResult<Self> {
        let file: CatalogFile =
            toml::from_str(text).map_err(|e| RadarError::Catalog(e.to_string()))?;

        let mut zone_subtypes = HashMap::new();
        for entry in file.zone_subtype {
            for id in entry.data_ids {
                if let Some(prev) = zone_subtypes.insert(id, entry.subtype) {
                    if prev != entry.subtype {
                        return Err(RadarError::Catalog(format!(
                            "data id {id} mapped to both {prev:?} and {:?}",
                            entry.subtype
                        )));
                    }
                }
            }
        }

        let mut ranks = HashMap::new();
        for entry in file.rank {
            ranks.extend(entry.data_ids.into_iter().map(|id| (id, entry.rank)));
        }

        Ok(Self {
            special_territories: file.special_territories.into_iter().collect(),
            blocked: file.blocked.into_iter().collect(),
            zone_subtypes,
            renames: file.rename.into_iter().map(|r| (r.data_id, r.name)).collect(),
            ranks,
        })
    }

    /// Merges rank data read from the host at startup.
    pub fn extend_ranks(&mut self, ranks: impl IntoIterator<Item = (u32, u8)>) {
        self.ranks.extend(ranks);
    }

    /// Adds a zone-subtype mapping.
    pub fn insert_zone_subtype(&mut self, data_id: u32, subtype: ZoneSubtype) {
        self.zone_subtypes.insert(data_id, subtype);
    }

    /// Adds a special-zone rename.
    pub fn insert_rename(&mut self, data_id: u32, name: impl Into<String>) {
        self.renames.insert(data_id, name.into());
    }

    /// Adds a data-id to the system block-list.
    pub fn insert_blocked(&mut self, data_id: u32) {
        self.blocked.insert(data_id);
    }

    /// `true` if the territory is a special zone.
    #[inline]
    #[must_use]
    pub fn is_special_territory(&self, territory_id: u16) -> bool {
        self.special_territories.contains(&territory_id)
    }

    /// `true` if the data-id is on the system block-list.
    #[inline]
    #[must_use]
    pub fn is_blocked(&self, data_id: u32) -> bool {
        self.blocked.contains(&data_id)
    }

    /// Zone subtype for a data-id.
    #[inline]
    #[must_use]
    pub fn zone_subtype(&self, data_id: u32) -> Option<ZoneSubtype> {
        self.zone_subtypes.get(&data_id).copied()
    }

    /// Special-zone display name for a data-id.
    #[inline]
    #[must_use]
    pub fn rename(&self, data_id: u32) -> Option<&str> {
        self.renames.get(&data_id).map(String::as_str)
    }

    /// Rank for a battle NPC data-id.
    #[inline]
    #[must_use]
    pub fn rank(&self, data_id: u32) -> Option<u8> {
        self.ranks.get(&data_id).copied()
    }
}
