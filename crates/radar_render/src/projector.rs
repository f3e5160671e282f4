//! World-to-screen projection.
//!
//! The host normally supplies the projector (it owns the camera). Two
//! implementations live here: [`ViewProjector`] for a view-projection
//! matrix and [`TopDownProjector`] for a flat minimap view.

use radar_shared::{Vec2, Vec3};

/// Result of projecting one world point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Projection {
    /// Screen position in pixels. Meaningful even when off-screen: it
    /// points in the direction of the world point.
    pub screen: Vec2,
    /// Inside the viewport and in front of the camera.
    pub on_screen: bool,
}

/// Projects world positions to screen pixels.
pub trait Projector {
    /// Projects a world point.
    fn world_to_screen(&self, world: Vec3) -> Projection;

    /// Viewport size in pixels.
    fn viewport(&self) -> Vec2;
}

/// Projector backed by a column-major view-projection matrix (0..1 depth).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewProjector {
    view_proj: [[f32; 4]; 4],
    viewport: Vec2,
}

impl ViewProjector {
    const W_EPSILON: f32 = 1e-5;

    /// Wraps an existing view-projection matrix.
    #[must_use]
    pub const fn new(view_proj: [[f32; 4]; 4], viewport: Vec2) -> Self {
        Self { view_proj, viewport }
    }

    /// Right-handed perspective camera at `eye` looking at `target`, `+y` up.
    #[must_use]
    pub fn look_at(eye: Vec3, target: Vec3, fov_y: f32, viewport: Vec2, near: f32, far: f32) -> Self {
        let f = (target - eye).normalized();
        let s = f.cross(Vec3::new(0.0, 1.0, 0.0)).normalized();
        let u = s.cross(f);
        let view = [
            [s.x, u.x, -f.x, 0.0],
            [s.y, u.y, -f.y, 0.0],
            [s.z, u.z, -f.z, 0.0],
            [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
        ];

        let h = 1.0 / (fov_y * 0.5).tan();
        let w = h * viewport.y / viewport.x;
        let r = far / (near - far);
        let proj = [
            [w, 0.0, 0.0, 0.0],
            [0.0, h, 0.0, 0.0],
            [0.0, 0.0, r, -1.0],
            [0.0, 0.0, r * near, 0.0],
        ];

        Self::new(mul(&proj, &view), viewport)
    }
}

/// Column-major `a * b`.
fn mul(a: &[[f32; 4]; 4], b: &[[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let mut out = [[0.0; 4]; 4];
    for (c, column) in out.iter_mut().enumerate() {
        for (r, cell) in column.iter_mut().enumerate() {
            *cell = (0..4).map(|k| a[k][r] * b[c][k]).sum();
        }
    }
    out
}

impl Projector for ViewProjector {
    fn world_to_screen(&self, world: Vec3) -> Projection {
        let m = &self.view_proj;
        let v = [world.x, world.y, world.z, 1.0];
        let clip = |r: usize| (0..4).map(|c| m[c][r] * v[c]).sum::<f32>();
        let (x, y, z, w) = (clip(0), clip(1), clip(2), clip(3));

        // Behind the camera: divide by |w| so the direction stays usable
        let inv_w = 1.0 / w.abs().max(Self::W_EPSILON);
        let ndc = Vec3::new(x * inv_w, y * inv_w, z * inv_w);

        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        );
        let on_screen = w > Self::W_EPSILON
            && (-1.0..=1.0).contains(&ndc.x)
            && (-1.0..=1.0).contains(&ndc.y)
            && (0.0..=1.0).contains(&ndc.z);

        Projection { screen, on_screen }
    }

    fn viewport(&self) -> Vec2 {
        self.viewport
    }
}

/// Flat top-down projection: `x` right, `z` down, centered on `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopDownProjector {
    /// World point drawn at the viewport center.
    pub origin: Vec3,
    /// Pixels per world unit.
    pub scale: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

impl TopDownProjector {
    /// Creates a projector.
    #[must_use]
    pub const fn new(origin: Vec3, scale: f32, viewport: Vec2) -> Self {
        Self { origin, scale, viewport }
    }
}

impl Projector for TopDownProjector {
    fn world_to_screen(&self, world: Vec3) -> Projection {
        let screen = Vec2::new(
            self.viewport.x * 0.5 + (world.x - self.origin.x) * self.scale,
            self.viewport.y * 0.5 + (world.z - self.origin.z) * self.scale,
        );
        let on_screen = (0.0..=self.viewport.x).contains(&screen.x) && (0.0..=self.viewport.y).contains(&screen.y);
        Projection { screen, on_screen }
    }

    fn viewport(&self) -> Vec2 {
        self.viewport
    }
}
