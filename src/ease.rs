#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_stable() {
        for ease in [Ease::Linear, Ease::InQuad, Ease::OutQuad, Ease::InOutQuad] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn in_quad_squares_phase() {
        assert_eq!(Ease::InQuad.apply(0.5), 0.25);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        for ease in [Ease::Linear, Ease::InQuad, Ease::OutQuad, Ease::InOutQuad] {
            assert_eq!(ease.apply(-1.0), 0.0);
            assert_eq!(ease.apply(2.0), 1.0);
        }
    }
}
