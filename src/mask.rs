use crate::error::{SiluetError, SiluetResult};

/// Single-channel silhouette mask at a fixed low resolution.
///
/// Two instances live side by side during play: the target mask, rendered
/// once at scene setup, and the current mask, overwritten in place on every
/// check. Both must share dimensions; [`crate::compare`] rejects pairs that
/// do not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MaskImage {
    pub fn new(width: u32, height: u32) -> SiluetResult<Self> {
        if width == 0 || height == 0 {
            return Err(SiluetError::configuration(
                "mask width/height must be > 0",
            ));
        }
        Ok(Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize)],
        })
    }

    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> SiluetResult<Self> {
        let mut mask = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                mask.data[(y * width + x) as usize] = f(x, y);
            }
        }
        Ok(mask)
    }

    /// Overwrites this mask with one channel of an RGBA8 readback buffer.
    ///
    /// The comparison is single-channel on red, matching the mask pass:
    /// white foreground against a black clear, so any one channel carries
    /// the full silhouette.
    pub fn copy_from_rgba8(&mut self, rgba: &[u8]) -> SiluetResult<()> {
        let expected = self.data.len() * 4;
        if rgba.len() != expected {
            return Err(SiluetError::render(format!(
                "readback buffer is {} bytes, mask {}x{} needs {}",
                rgba.len(),
                self.width,
                self.height,
                expected
            )));
        }
        for (px, chunk) in self.data.iter_mut().zip(rgba.chunks_exact(4)) {
            *px = chunk[0];
        }
        Ok(())
    }

    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn same_dimensions(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }
}
