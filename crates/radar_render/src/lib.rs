//! # RADAR Render
//!
//! Turns the published snapshot into immediate-mode draw calls.
//!
//! ## Architecture Rules
//!
//! 1. **Never block the draw callback** - the snapshot is read with `try_lock`
//! 2. **The host owns the surface** - drawing goes through [`DrawList`]
//! 3. **The host owns the camera** - projection goes through [`Projector`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use radar_render::{CommandBuffer, FrameInput, RenderPass, TopDownProjector};
//!
//! let pass = RenderPass::new();
//! let projector = TopDownProjector::new(Vec3::ZERO, 8.0, Vec2::new(1920.0, 1080.0));
//! let mut draw = CommandBuffer::new();
//! let input = FrameInput { projector: &projector, local_position: None };
//! pass.render(&snapshot, &config, &input, &mut draw);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod draw;
pub mod pass;
pub mod projector;
pub mod shapes;
pub mod stats;

pub use draw::{CommandBuffer, DrawCommand, DrawList};
pub use pass::{FrameInput, FrameOutcome, RenderPass};
pub use projector::{Projection, Projector, TopDownProjector, ViewProjector};
pub use stats::{FrameStats, RenderStats};
