use glam::{Mat4, Quat, Vec3};

use crate::tween::Lerp;

/// Projection and world pose of one camera, the unit the reveal transition
/// interpolates. The gameplay camera's state is overwritten destructively
/// while a transition runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub projection: Mat4,
    pub position: Vec3,
    pub rotation: Quat,
}

impl CameraState {
    pub fn new(projection: Mat4, position: Vec3, rotation: Quat) -> Self {
        Self {
            projection,
            position,
            rotation,
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Lerp for CameraState {
    /// Projection element-wise over all 16 components, position linearly,
    /// rotation spherically.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            projection: Lerp::lerp(&a.projection, &b.projection, t),
            position: Lerp::lerp(&a.position, &b.position, t),
            rotation: Lerp::lerp(&a.rotation, &b.rotation, t),
        }
    }
}

/// Normalized viewport rect of a camera, in [0, 1] screen fractions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const FULL: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };
}

/// Description of the fixed low-resolution offscreen target the mask pass
/// renders into. A small fraction of native resolution keeps the per-check
/// comparison cheap; silhouette agreement survives the downsample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderTarget {
    pub width: u32,
    pub height: u32,
}

/// The auxiliary camera the silhouette pass renders from. Distinct from the
/// display camera; other systems may also use it, so the mask pass must
/// leave its viewport and target binding exactly as found.
#[derive(Clone, Copy, Debug)]
pub struct AuxCamera {
    pub viewport: Viewport,
    pub target: Option<RenderTarget>,
    pub clear_color: [u8; 4],
}

impl AuxCamera {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::FULL,
            target: None,
            clear_color: [0, 0, 0, 255],
        }
    }

    /// Runs `f` with the camera set up for a mask pass (full-rect viewport,
    /// `target` bound, black clear) and restores the previous viewport,
    /// binding, and clear color on every exit path, error or not.
    pub fn with_mask_pass<T>(
        &mut self,
        target: RenderTarget,
        f: impl FnOnce(&AuxCamera) -> T,
    ) -> T {
        let saved = (self.viewport, self.target, self.clear_color);

        self.viewport = Viewport::FULL;
        self.target = Some(target);
        self.clear_color = [0, 0, 0, 255];

        let out = f(self);

        (self.viewport, self.target, self.clear_color) = saved;
        out
    }
}

impl Default for AuxCamera {
    fn default() -> Self {
        Self::new()
    }
}
