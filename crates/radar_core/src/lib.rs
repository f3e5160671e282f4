//! # RADAR Core
//!
//! Entity classification and the background refresh loop of the overlay.
//!
//! ## Architecture Rules
//!
//! 1. **Resolution is pure** - [`Resolver`] reads its inputs and nothing else
//! 2. **Priority is data** - eligibility clauses and rule tiers are ordered tables
//! 3. **One bad entity never aborts a cycle** - faults are skipped and logged
//! 4. **Readers never see half a list** - [`Snapshot`] swaps whole lists
//!
//! ## Example
//!
//! ```rust,ignore
//! use radar_core::{resolve, Catalog, Configuration, Entity, ObjectKind, ZoneContext};
//!
//! let catalog = Catalog::builtin()?;
//! let config = Configuration::default();
//! let goblin = Entity::new(1, ObjectKind::BattleNpc, "Goblin");
//! let res = resolve(&goblin, &config, &catalog, &ZoneContext::default());
//! println!("{} -> {:?}", res.label, res.rule_ref);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod config;
pub mod entity;
pub mod error;
pub mod kind;
pub mod refresh;
pub mod resolver;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod testing;
pub mod worker;

pub use catalog::{Catalog, ZoneSubtype};
pub use config::{
    Configuration, DisplayComponents, DisplayType, EspOption, KindRule, RuleRef, SeparatedEspOption,
};
pub use entity::{BattleNpcSubKind, Entity, ObjectKind, Relationship};
pub use error::{EntityFault, RadarError, RadarResult};
pub use kind::{DrawProfile, KindProfile};
pub use refresh::{should_suppress, RefreshOutcome, Refresher, SuppressReason};
pub use resolver::{is_eligible, resolve, resolve_label, Eligibility, Ineligible, Resolution, Resolver};
pub use snapshot::{Snapshot, SnapshotEntry, SnapshotRead};
pub use source::{EntitySource, LocalPlayer, ZoneContext, ZoneOracle};
pub use store::{ConfigStore, MemoryStore, SharedConfig, TomlFileStore};
pub use worker::{RefreshTrigger, RefreshWorker};
