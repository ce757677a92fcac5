use crate::{
    camera::{AuxCamera, RenderTarget},
    error::SiluetResult,
};

/// Handle to one scene object the host engine owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Handle to a material the host engine owns. The core only ever swaps
/// handles around; it never inspects material contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// The scene boundary. Rendering and pixel readback are opaque primitives;
/// the core drives them but draws nothing itself.
pub trait Scene {
    /// Objects participating in the silhouette, the host's tag-based set.
    fn maskables(&self) -> Vec<ObjectId>;

    /// Current material of an object, `None` if it has no renderer.
    fn material(&self, object: ObjectId) -> Option<MaterialId>;

    fn set_material(&mut self, object: ObjectId, material: MaterialId);

    /// Renders the scene once from `camera` into its bound target.
    fn render(&mut self, camera: &AuxCamera) -> SiluetResult<()>;

    /// Reads the target's pixels back as RGBA8, row-major,
    /// `width * height * 4` bytes.
    fn read_target(&mut self, target: RenderTarget, out: &mut [u8]) -> SiluetResult<()>;
}

/// Host-side effects the core triggers but does not implement: the win cue,
/// the input blocker, the fade overlay, the confidence tint, and the
/// transform gizmo that shrinks away during the reveal.
pub trait Feedback {
    fn play_win_cue(&mut self);
    fn set_blocker(&mut self, visible: bool);
    fn set_overlay_alpha(&mut self, alpha: f32);
    fn set_gizmo_scale(&mut self, scale: f32);
    fn set_feedback_color(&mut self, rgba: [u8; 4]);
}

/// Level indexing and loading live with the host; fade sequencing around a
/// load is the host's concern too.
pub trait LevelLoader {
    fn current_level(&self) -> u32;
    fn load_level(&mut self, index: u32) -> SiluetResult<()>;
}
