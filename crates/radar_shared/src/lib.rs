//! # RADAR Shared
//!
//! Common types used by both the rule resolver and the renderer.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - threads, locks or channels
//! - any host/game binding
//! - any drawing backend
//!
//! If you need drawing types, put them in `radar_render`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod constants;
pub mod math;

pub use color::Rgba;
pub use math::{Vec2, Vec3};
