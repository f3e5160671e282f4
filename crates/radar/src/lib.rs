//! # RADAR
//!
//! Entity radar overlay hosted inside a game client's draw loop.
//!
//! ```text
//! ┌──────────────┐  enumerate   ┌───────────────┐  publish   ┌──────────┐
//! │ EntitySource │ ───────────> │ refresh worker│ ─────────> │ Snapshot │
//! └──────────────┘   (~1 Hz)    │  + Resolver   │            └────┬─────┘
//!                               └───────────────┘                 │ try_lock
//! ┌──────────────┐  on_draw                               ┌───────▼─────┐
//! │  PluginHost  │ ─────────────────────────────────────> │ RenderPass  │
//! └──────────────┘  on_territory_changed / login / logout └─────────────┘
//!                   clear snapshot synchronously
//! ```
//!
//! ## Modules
//!
//! - `host`: host event registration and an in-process [`EventHub`]
//! - `lifecycle`: [`Radar`], start/stop ordering and event handlers

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod host;
pub mod lifecycle;

pub use radar_core as core;
pub use radar_render as render;
pub use radar_shared as shared;

pub use host::{EventHub, HostListener, PluginHost, SubscriptionId};
pub use lifecycle::{Radar, RadarServices};
