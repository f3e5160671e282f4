//! # Marker Geometry
//!
//! Each function emits the draw calls for one marker. Screen-space
//! markers take a projected position; world-space markers (aggro cone,
//! hitbox ring) project their own ring of points.

use std::f32::consts::{PI, TAU};

use radar_core::config::{AggroRadiusOptions, HitboxOptions, OffScreenOptions};
use radar_shared::constants::{
    AGGRO_FRONT_THICKNESS, AGGRO_ROTATION_OFFSET, AGGRO_SEGMENTS, AGGRO_SIDE_THICKNESS, DOT_SEGMENTS,
    HEALTH_RING_RADIUS, HEALTH_RING_SEGMENTS, HEALTH_RING_THICKNESS, HITBOX_SEGMENTS,
};
use radar_shared::{Rgba, Vec2, Vec3};

use crate::draw::DrawList;
use crate::projector::{Projection, Projector};

/// Last index of each aggro quarter: front, right, rear, left.
const AGGRO_QUARTER_ENDS: [usize; 4] = [
    AGGRO_SEGMENTS / 4,
    AGGRO_SEGMENTS / 2,
    AGGRO_SEGMENTS * 3 / 4,
    AGGRO_SEGMENTS - 1,
];

/// Filled dot.
pub fn draw_dot(draw: &mut dyn DrawList, pos: Vec2, radius: f32, color: Rgba) {
    draw.add_circle_filled(pos, radius, color, DOT_SEGMENTS);
}

/// Label centered horizontally, just below `pos`.
pub fn draw_name(draw: &mut dyn DrawList, pos: Vec2, text: &str, color: Rgba) {
    let size = draw.calc_text_size(text);
    draw.add_text(Vec2::new(pos.x - size.x / 2.0, pos.y + size.y / 2.0), color, text);
}

/// Health ring: an arc starting at the top, shrinking clockwise as health drops.
pub fn draw_health_circle(draw: &mut dyn DrawList, pos: Vec2, current: u32, max: u32, color: Rgba) {
    if max == 0 {
        return;
    }
    let end = TAU - TAU / 4.0;
    draw.path_arc_to(pos, HEALTH_RING_RADIUS, health_ring_start(current, max), end, HEALTH_RING_SEGMENTS);
    draw.path_stroke(color, false, HEALTH_RING_THICKNESS);
}

/// Integer health percentage centered on `pos`.
pub fn draw_health_value(draw: &mut dyn DrawList, pos: Vec2, current: u32, max: u32, color: Rgba) {
    if max == 0 {
        return;
    }
    let percent = u64::from(current.min(max)) * 100 / u64::from(max);
    let text = format!("{percent}%");
    let size = draw.calc_text_size(&text);
    draw.add_text(Vec2::new(pos.x - size.x / 2.0, pos.y - size.y / 2.0), color, &text);
}

/// Directional aggro cone around `center`.
///
/// A ring of world points is projected; four quarter arcs are stroked in
/// their own colors, and the front quarter is filled as a convex fan
/// anchored at the projected center.
pub fn draw_aggro_cone(
    draw: &mut dyn DrawList,
    projector: &dyn Projector,
    center: Vec3,
    radius: f32,
    rotation: f32,
    opts: &AggroRadiusOptions,
) {
    let rotation = rotation + AGGRO_ROTATION_OFFSET;
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / AGGRO_SEGMENTS as f32;

    let mut ring = [Projection::default(); AGGRO_SEGMENTS];
    for (i, slot) in ring.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let angle = rotation - step * i as f32;
        *slot = projector.world_to_screen(center.on_ground_circle(radius, angle));
    }

    let arc = opts.circle_opacity;
    let [front_end, right_end, rear_end, left_end] = AGGRO_QUARTER_ENDS;

    stroke_visible(draw, &ring[..=front_end], opts.front_color.masked(arc), AGGRO_FRONT_THICKNESS);

    // Apex off screen: discard the traced arc
    trace_visible(draw, &ring[..=front_end]);
    let anchor = projector.world_to_screen(center);
    if anchor.on_screen {
        draw.path_line_to(anchor.screen);
        draw.path_fill_convex(opts.front_cone_color.masked(opts.front_cone_opacity));
    } else {
        draw.path_clear();
    }

    stroke_visible(draw, &ring[front_end..=right_end], opts.right_side_color.masked(arc), AGGRO_SIDE_THICKNESS);
    stroke_visible(draw, &ring[right_end..=rear_end], opts.rear_color.masked(arc), AGGRO_SIDE_THICKNESS);

    // Left quarter closes the ring back to the first point
    trace_visible(draw, &ring[rear_end..=left_end]);
    if ring[0].on_screen {
        draw.path_line_to(ring[0].screen);
    }
    draw.path_stroke(opts.left_side_color.masked(arc), false, AGGRO_SIDE_THICKNESS);
}

fn trace_visible(draw: &mut dyn DrawList, points: &[Projection]) {
    for p in points.iter().filter(|p| p.on_screen) {
        draw.path_line_to(p.screen);
    }
}

fn stroke_visible(draw: &mut dyn DrawList, points: &[Projection], color: Rgba, thickness: f32) {
    trace_visible(draw, points);
    draw.path_stroke(color, false, thickness);
}

/// Hitbox ring at `radius` world units around `center`.
///
/// Skipped unless the whole ring projects on screen.
pub fn draw_hitbox(
    draw: &mut dyn DrawList,
    projector: &dyn Projector,
    center: Vec3,
    radius: f32,
    rule_color: Rgba,
    opts: &HitboxOptions,
) {
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / HITBOX_SEGMENTS as f32;
    let mut ring = [Projection::default(); HITBOX_SEGMENTS];
    for (i, slot) in ring.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let angle = step * i as f32;
        *slot = projector.world_to_screen(center.on_ground_circle(radius, angle));
    }
    if !ring.iter().all(|p| p.on_screen) {
        return;
    }

    let color = if opts.override_mob_color { opts.hitbox_color } else { rule_color };
    if opts.draw_inside_circle {
        let fill = if opts.use_different_inside_color {
            opts.inside_color
        } else {
            color.masked(opts.inside_opacity)
        };
        trace_visible(draw, &ring);
        draw.path_fill_convex(fill);
    }
    trace_visible(draw, &ring);
    draw.path_stroke(color, true, opts.thickness);
}

/// Arrow at the screen edge pointing toward an off-screen projection.
pub fn draw_off_screen(draw: &mut dyn DrawList, target: Vec2, viewport: Vec2, opts: &OffScreenOptions, color: Rgba) {
    let center = viewport * 0.5;
    let dir = (target - center).normalized();
    if dir == Vec2::ZERO {
        return;
    }

    // Scale the direction until it meets the inset rectangle
    let half = Vec2::new(
        (center.x - opts.distance_from_edge).max(0.0),
        (center.y - opts.distance_from_edge).max(0.0),
    );
    let reach = |extent: f32, d: f32| if d.abs() > f32::EPSILON { extent / d.abs() } else { f32::INFINITY };
    let t = reach(half.x, dir.x).min(reach(half.y, dir.y));

    let tip = center + dir * t;
    let base = tip - dir * (opts.size * 2.0);
    let side = dir.perpendicular() * opts.size;

    for p in [tip, base + side, base - side] {
        draw.path_line_to(p);
    }
    draw.path_fill_convex(color);
    for p in [tip, base + side, base - side] {
        draw.path_line_to(p);
    }
    draw.path_stroke(Rgba::BLACK.with_alpha(color.alpha()), true, opts.thickness);
}

/// Start angle of the health ring; the end is fixed at `3π/2`.
fn health_ring_start(current: u32, max: u32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let (current, max) = (current.min(max) as f32, max as f32);
    -PI / 2.0 + TAU / max * (max - current)
}
