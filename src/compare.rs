use crate::{
    error::{SiluetError, SiluetResult},
    mask::MaskImage,
    tween::inverse_lerp,
};

/// Normalized pixel-difference ratio in [0, 1]. Lower is more similar.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize)]
pub struct SimilarityScore(pub f64);

impl SimilarityScore {
    pub fn value(self) -> f64 {
        self.0
    }

    /// Win test per the match rules: strictly below the threshold.
    pub fn is_match(self, confidence_threshold: f64) -> bool {
        self.0 < confidence_threshold
    }
}

/// Counts pixels whose compared channel differs between the two masks and
/// returns the count over the total pixel count.
///
/// Exact inequality, no tolerance band: a one-value difference is a
/// mismatch. The metric only needs silhouette-level agreement, and the mask
/// pass renders flat white on black, so near-values only appear on
/// anti-aliased edges and are intentionally counted.
pub fn compare(a: &MaskImage, b: &MaskImage) -> SiluetResult<SimilarityScore> {
    if !a.same_dimensions(b) {
        return Err(SiluetError::comparison(format!(
            "mask dimensions differ: {}x{} vs {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }

    let diff = a
        .pixels()
        .iter()
        .zip(b.pixels())
        .filter(|(pa, pb)| pa != pb)
        .count();

    Ok(SimilarityScore(diff as f64 / a.pixel_count() as f64))
}

/// Maps a score onto [0, 1] between a confidence lower bound and an upper
/// bound: at or below `low` -> 0, at or above `high` -> 1.
pub fn feedback_fraction(score: SimilarityScore, low: f64, high: f64) -> f64 {
    inverse_lerp(low, high, score.0)
}

/// Confidence tint: cyan at a near-perfect match shading to red as the
/// silhouettes diverge.
pub fn feedback_color(score: SimilarityScore, low: f64, high: f64) -> [u8; 4] {
    const CYAN: [u8; 4] = [0, 255, 255, 255];
    const RED: [u8; 4] = [255, 0, 0, 255];

    let t = feedback_fraction(score, low, high);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let a = f64::from(CYAN[i]);
        let b = f64::from(RED[i]);
        out[i] = (a + (b - a) * t).round().clamp(0.0, 255.0) as u8;
    }
    out
}
