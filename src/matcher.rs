use crate::{
    compare::{SimilarityScore, compare, feedback_color},
    error::SiluetResult,
    mask::MaskImage,
    scene::Scene,
    silhouette::SilhouetteRenderer,
};

/// Win state of the puzzle. Monotonic: once `Won`, later checks cannot
/// revert it, and the monitor stops re-rendering entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum MatchState {
    InProgress,
    Won,
}

/// Outcome of one actual render-and-compare check.
#[derive(Clone, Copy, Debug)]
pub struct CheckReport {
    pub score: SimilarityScore,
    pub color: [u8; 4],
    pub state: MatchState,
}

/// Polls the silhouette at a bounded rate and latches the win.
///
/// Owns the target mask (computed once at setup, immutable here) and the
/// current mask (overwritten in place on every check). Rate limiting uses
/// time since the last check rather than a tick counter, so it behaves the
/// same under variable frame rates.
#[derive(Debug)]
pub struct MatchMonitor {
    interval: f64,
    threshold: f64,
    feedback_high: f64,
    clock: f64,
    last_check: Option<f64>,
    state: MatchState,
    last_score: Option<SimilarityScore>,
    target: MaskImage,
    current: MaskImage,
}

impl MatchMonitor {
    pub fn new(target: MaskImage, interval: f64, threshold: f64, feedback_high: f64) -> Self {
        let mut current = target.clone();
        current.fill(0);
        Self {
            interval,
            threshold,
            feedback_high,
            clock: 0.0,
            last_check: None,
            state: MatchState::InProgress,
            last_score: None,
            target,
            current,
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state == MatchState::Won
    }

    pub fn last_score(&self) -> Option<SimilarityScore> {
        self.last_score
    }

    pub fn target_mask(&self) -> &MaskImage {
        &self.target
    }

    /// Advances the monitor by one tick. Returns `None` when the tick was
    /// rate-limited away or the puzzle is already won, `Some` when a real
    /// render-and-compare check ran.
    #[tracing::instrument(skip_all)]
    pub fn tick<S: Scene + ?Sized>(
        &mut self,
        dt: f64,
        scene: &mut S,
        renderer: &mut SilhouetteRenderer,
    ) -> SiluetResult<Option<CheckReport>> {
        self.clock += dt;

        // Rechecking after a win is wasted work; the terminal state never
        // resets even if the live scene would now score worse.
        if self.state == MatchState::Won {
            return Ok(None);
        }

        let due = match self.last_check {
            None => true,
            Some(at) => self.clock - at > self.interval,
        };
        if !due {
            return Ok(None);
        }
        self.last_check = Some(self.clock);

        renderer.render_silhouette(scene, &mut self.current)?;
        let score = compare(&self.target, &self.current)?;
        self.last_score = Some(score);

        if score.is_match(self.threshold) {
            self.state = MatchState::Won;
        }
        tracing::debug!(
            score = score.value(),
            won = self.is_won(),
            "silhouette check"
        );

        Ok(Some(CheckReport {
            score,
            color: feedback_color(score, self.threshold, self.feedback_high),
            state: self.state,
        }))
    }
}
