use crate::{
    camera::{CameraState, RenderTarget},
    error::{SiluetError, SiluetResult},
    matcher::{MatchMonitor, MatchState},
    scene::{Feedback, LevelLoader, MaterialId, Scene},
    silhouette::SilhouetteRenderer,
    transition::{RevealTransition, TransitionState},
};

/// Tuning for one level, with the shipped defaults. The mask resolution is
/// 1/8 of a 1600x1200 native frame.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mask_width: u32,
    pub mask_height: u32,
    /// Win when score is strictly below this.
    pub confidence_threshold: f64,
    /// Minimum seconds between render-and-compare checks.
    pub check_interval: f64,
    /// Seconds the reveal transition takes.
    pub transition_duration: f64,
    /// Score mapped to the far end of the confidence tint.
    pub feedback_high: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mask_width: 1600 / 8,
            mask_height: 1200 / 8,
            confidence_threshold: 0.002,
            check_interval: 0.01,
            transition_duration: 2.0,
            feedback_high: 0.07,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> SiluetResult<()> {
        if self.mask_width == 0 || self.mask_height == 0 {
            return Err(SiluetError::configuration(
                "mask_width/mask_height must be > 0",
            ));
        }
        if !(self.check_interval > 0.0) {
            return Err(SiluetError::configuration("check_interval must be > 0"));
        }
        if !(self.transition_duration > 0.0) {
            return Err(SiluetError::configuration(
                "transition_duration must be > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(SiluetError::configuration(
                "confidence_threshold must be in [0, 1]",
            ));
        }
        if self.feedback_high <= self.confidence_threshold {
            return Err(SiluetError::configuration(
                "feedback_high must exceed confidence_threshold",
            ));
        }
        Ok(())
    }

    pub fn target(&self) -> RenderTarget {
        RenderTarget {
            width: self.mask_width,
            height: self.mask_height,
        }
    }
}

/// Elapsed time since the previous frame, as the host scheduler reports it.
///
/// The engine itself advances on `scaled` time, like the gameplay it
/// watches. `unscaled` is carried for the host's own tween layer: feed it
/// to [`crate::tween`] state objects that must keep real-time pace while
/// the game clock is slowed or paused (the realtime delay/move variants).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickDelta {
    pub scaled: f64,
    pub unscaled: f64,
}

impl TickDelta {
    pub fn uniform(dt: f64) -> Self {
        Self {
            scaled: dt,
            unscaled: dt,
        }
    }
}

/// Ties the whole core together behind one per-frame call.
///
/// Within a tick the order is fixed: match check, then win latch, then
/// transition update, so a win latched this tick applies its first
/// interpolation step this same tick. Everything runs synchronously inside
/// the host's frame callback; the engine owns no thread.
#[derive(Debug)]
pub struct MatchEngine {
    renderer: SilhouetteRenderer,
    monitor: MatchMonitor,
    transition: RevealTransition,
    gameplay_camera: CameraState,
    reveal_camera: CameraState,
}

impl MatchEngine {
    /// Builds the engine and renders the target silhouette immediately.
    ///
    /// The host must have the scene showing the *target* arrangement when
    /// this runs (swap the real objects out for the target set around
    /// setup); afterwards the target mask is immutable.
    pub fn new<S: Scene + ?Sized>(
        config: EngineConfig,
        white_material: MaterialId,
        gameplay_camera: CameraState,
        reveal_camera: CameraState,
        scene: &mut S,
    ) -> SiluetResult<Self> {
        config.validate()?;

        let mut renderer = SilhouetteRenderer::new(config.target(), white_material)?;
        let mut target_mask = renderer.new_mask()?;
        renderer.render_silhouette(scene, &mut target_mask)?;

        let monitor = MatchMonitor::new(
            target_mask,
            config.check_interval,
            config.confidence_threshold,
            config.feedback_high,
        );

        Ok(Self {
            renderer,
            monitor,
            transition: RevealTransition::new(config.transition_duration),
            gameplay_camera,
            reveal_camera,
        })
    }

    #[tracing::instrument(skip_all)]
    pub fn tick<S: Scene + ?Sized>(
        &mut self,
        dt: TickDelta,
        scene: &mut S,
        feedback: &mut dyn Feedback,
    ) -> SiluetResult<()> {
        if let Some(report) = self.monitor.tick(dt.scaled, scene, &mut self.renderer)? {
            feedback.set_feedback_color(report.color);
        }

        if self.monitor.is_won() {
            // One-shot inside the transition; calling every won tick is fine.
            self.transition.trigger(feedback);
        }

        self.transition.tick(
            dt.scaled,
            &mut self.gameplay_camera,
            &self.reveal_camera,
            feedback,
        );
        Ok(())
    }

    pub fn match_state(&self) -> MatchState {
        self.monitor.state()
    }

    pub fn is_won(&self) -> bool {
        self.monitor.is_won()
    }

    pub fn transition_state(&self) -> TransitionState {
        self.transition.state()
    }

    pub fn last_score(&self) -> Option<crate::compare::SimilarityScore> {
        self.monitor.last_score()
    }

    pub fn gameplay_camera(&self) -> &CameraState {
        &self.gameplay_camera
    }

    /// The reveal destination, mutable so the host may animate it; the
    /// running transition tracks it live.
    pub fn reveal_camera_mut(&mut self) -> &mut CameraState {
        &mut self.reveal_camera
    }

    pub fn next_level(&self, loader: &mut dyn LevelLoader) -> SiluetResult<()> {
        loader.load_level(loader.current_level() + 1)
    }

    pub fn restart_level(&self, loader: &mut dyn LevelLoader) -> SiluetResult<()> {
        loader.load_level(loader.current_level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mask_width, 200);
        assert_eq!(config.mask_height, 150);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut c = EngineConfig::default();
        c.mask_width = 0;
        assert!(c.validate().is_err());

        let mut c = EngineConfig::default();
        c.check_interval = 0.0;
        assert!(c.validate().is_err());

        let mut c = EngineConfig::default();
        c.transition_duration = -1.0;
        assert!(c.validate().is_err());

        let mut c = EngineConfig::default();
        c.confidence_threshold = 1.5;
        assert!(c.validate().is_err());

        let mut c = EngineConfig::default();
        c.feedback_high = c.confidence_threshold;
        assert!(c.validate().is_err());
    }

    #[test]
    fn config_json_roundtrip_with_defaults() {
        let de: EngineConfig = serde_json::from_str(r#"{ "confidence_threshold": 0.01 }"#).unwrap();
        assert_eq!(de.confidence_threshold, 0.01);
        assert_eq!(de.mask_width, 200);
        assert_eq!(de.transition_duration, 2.0);
    }
}
