use crate::{
    camera::{AuxCamera, RenderTarget},
    error::{SiluetError, SiluetResult},
    mask::MaskImage,
    scene::{MaterialId, Scene},
};

/// Renders the maskable set in flat unlit white against a black clear into
/// a fixed low-resolution offscreen target and reads the result back into a
/// [`MaskImage`].
///
/// Owns the auxiliary camera description, the target, and the readback
/// scratch buffer. Material overrides are restored on every path: a render
/// failure must never leave the scene wearing the white material.
#[derive(Debug)]
pub struct SilhouetteRenderer {
    camera: AuxCamera,
    target: RenderTarget,
    white_material: MaterialId,
    scratch: Vec<u8>,
}

impl SilhouetteRenderer {
    pub fn new(target: RenderTarget, white_material: MaterialId) -> SiluetResult<Self> {
        if target.width == 0 || target.height == 0 {
            return Err(SiluetError::configuration(
                "silhouette target width/height must be > 0",
            ));
        }
        let bytes = (target.width as usize) * (target.height as usize) * 4;
        Ok(Self {
            camera: AuxCamera::new(),
            target,
            white_material,
            scratch: vec![0; bytes],
        })
    }

    pub fn target(&self) -> RenderTarget {
        self.target
    }

    /// A zeroed mask sized to this renderer's target.
    pub fn new_mask(&self) -> SiluetResult<MaskImage> {
        MaskImage::new(self.target.width, self.target.height)
    }

    #[tracing::instrument(skip_all)]
    pub fn render_silhouette<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        mask: &mut MaskImage,
    ) -> SiluetResult<()> {
        if mask.width() != self.target.width || mask.height() != self.target.height {
            return Err(SiluetError::render(format!(
                "mask {}x{} does not match silhouette target {}x{}",
                mask.width(),
                mask.height(),
                self.target.width,
                self.target.height
            )));
        }

        let mut overridden = Vec::new();
        for object in scene.maskables() {
            if let Some(original) = scene.material(object) {
                overridden.push((object, original));
                scene.set_material(object, self.white_material);
            }
        }

        let rendered = self
            .camera
            .with_mask_pass(self.target, |camera| scene.render(camera));

        // Restore before propagating any render error.
        for (object, original) in overridden {
            scene.set_material(object, original);
        }
        rendered?;

        scene.read_target(self.target, &mut self.scratch)?;
        mask.copy_from_rgba8(&self.scratch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const WHITE: MaterialId = MaterialId(99);

    struct StubScene {
        materials: BTreeMap<crate::scene::ObjectId, MaterialId>,
        fail_render: bool,
        rendered_with: Option<AuxCamera>,
    }

    impl StubScene {
        fn new(materials: &[(u64, u32)]) -> Self {
            Self {
                materials: materials
                    .iter()
                    .map(|&(o, m)| (crate::scene::ObjectId(o), MaterialId(m)))
                    .collect(),
                fail_render: false,
                rendered_with: None,
            }
        }
    }

    impl Scene for StubScene {
        fn maskables(&self) -> Vec<crate::scene::ObjectId> {
            self.materials.keys().copied().collect()
        }

        fn material(&self, object: crate::scene::ObjectId) -> Option<MaterialId> {
            self.materials.get(&object).copied()
        }

        fn set_material(&mut self, object: crate::scene::ObjectId, material: MaterialId) {
            self.materials.insert(object, material);
        }

        fn render(&mut self, camera: &AuxCamera) -> SiluetResult<()> {
            assert!(
                self.materials.values().all(|&m| m == WHITE),
                "mask pass must render every maskable in the white material"
            );
            self.rendered_with = Some(*camera);
            if self.fail_render {
                return Err(SiluetError::render("device lost"));
            }
            Ok(())
        }

        fn read_target(&mut self, target: RenderTarget, out: &mut [u8]) -> SiluetResult<()> {
            assert_eq!(out.len(), (target.width * target.height * 4) as usize);
            out.fill(0);
            out[0] = 255; // one lit pixel, channel 0
            Ok(())
        }
    }

    fn renderer() -> SilhouetteRenderer {
        SilhouetteRenderer::new(
            RenderTarget {
                width: 4,
                height: 2,
            },
            WHITE,
        )
        .unwrap()
    }

    #[test]
    fn rejects_zero_sized_target() {
        assert!(
            SilhouetteRenderer::new(
                RenderTarget {
                    width: 0,
                    height: 2
                },
                WHITE
            )
            .is_err()
        );
    }

    #[test]
    fn renders_and_reads_back_single_channel() {
        let mut scene = StubScene::new(&[(1, 10), (2, 20)]);
        let mut r = renderer();
        let mut mask = r.new_mask().unwrap();

        r.render_silhouette(&mut scene, &mut mask).unwrap();

        assert_eq!(mask.pixels()[0], 255);
        assert!(mask.pixels()[1..].iter().all(|&p| p == 0));
        let cam = scene.rendered_with.unwrap();
        assert_eq!(cam.viewport, crate::camera::Viewport::FULL);
        assert_eq!(cam.clear_color, [0, 0, 0, 255]);
    }

    #[test]
    fn materials_restored_after_success() {
        let mut scene = StubScene::new(&[(1, 10), (2, 20)]);
        let mut r = renderer();
        let mut mask = r.new_mask().unwrap();

        r.render_silhouette(&mut scene, &mut mask).unwrap();

        assert_eq!(
            scene.material(crate::scene::ObjectId(1)),
            Some(MaterialId(10))
        );
        assert_eq!(
            scene.material(crate::scene::ObjectId(2)),
            Some(MaterialId(20))
        );
    }

    #[test]
    fn materials_restored_even_when_render_fails() {
        let mut scene = StubScene::new(&[(1, 10), (2, 20)]);
        scene.fail_render = true;
        let mut r = renderer();
        let mut mask = r.new_mask().unwrap();

        assert!(r.render_silhouette(&mut scene, &mut mask).is_err());

        assert_eq!(
            scene.material(crate::scene::ObjectId(1)),
            Some(MaterialId(10))
        );
        assert_eq!(
            scene.material(crate::scene::ObjectId(2)),
            Some(MaterialId(20))
        );
    }

    #[test]
    fn mismatched_mask_is_rejected_before_any_override() {
        let mut scene = StubScene::new(&[(1, 10)]);
        let mut r = renderer();
        let mut mask = MaskImage::new(3, 3).unwrap();

        assert!(r.render_silhouette(&mut scene, &mut mask).is_err());
        assert_eq!(
            scene.material(crate::scene::ObjectId(1)),
            Some(MaterialId(10))
        );
    }
}
