//! # Design Constants
//!
//! Fixed values of the overlay. These are not user-configurable.

use std::time::Duration;

// =============================================================================
// REFRESH LOOP
// =============================================================================

/// Period of the background refresh loop.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Upper bound on how long teardown waits for the background worker.
pub const WORKER_JOIN_TIMEOUT: Duration = Duration::from_secs(3);

// =============================================================================
// LABELS
// =============================================================================

/// Label used for entities whose display name is blank.
pub const NAMELESS_PLACEHOLDER: &str = "''";

// =============================================================================
// HEALTH INDICATORS
// =============================================================================

/// Radius of the health ring in screen pixels.
pub const HEALTH_RING_RADIUS: f32 = 13.0;

/// Stroke thickness of the health ring.
pub const HEALTH_RING_THICKNESS: f32 = 2.0;

/// Segment count used when tessellating the health ring.
pub const HEALTH_RING_SEGMENTS: usize = 199;

// =============================================================================
// AGGRO CONE
// =============================================================================

/// Base aggro radius in world units; the entity's hitbox radius is added.
pub const AGGRO_BASE_RADIUS: f32 = 10.0;

/// Number of world-space points sampled around the aggro ring.
pub const AGGRO_SEGMENTS: usize = 200;

/// Rotation offset so the front quarter is centered on the facing direction.
pub const AGGRO_ROTATION_OFFSET: f32 = std::f32::consts::FRAC_PI_4;

/// Stroke thickness of the front arc.
pub const AGGRO_FRONT_THICKNESS: f32 = 4.0;

/// Stroke thickness of the side and rear arcs.
pub const AGGRO_SIDE_THICKNESS: f32 = 2.0;

// =============================================================================
// DOTS AND RINGS
// =============================================================================

/// Segment count for filled dots.
pub const DOT_SEGMENTS: usize = 100;

/// Segment count for hitbox rings.
pub const HITBOX_SEGMENTS: usize = 100;
