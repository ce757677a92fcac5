use crate::{camera::CameraState, ease::Ease, scene::Feedback, tween::Lerp};

/// Lifecycle of the one reveal transition a level gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    Armed,
    Running,
    Complete,
}

#[derive(Clone, Copy, Debug)]
enum Inner {
    Idle,
    Armed,
    Running { started_at: f64, from: CameraState },
    Complete,
}

/// One-shot, time-driven interpolation of the gameplay camera toward the
/// reveal camera.
///
/// The source pose is snapshotted when the transition starts running; the
/// destination is read live every tick, so a reveal camera animated by
/// something else is tracked mid-flight. Camera motion eases in
/// (squared phase) while the overlay fade and the gizmo shrink stay linear.
#[derive(Debug)]
pub struct RevealTransition {
    duration: f64,
    clock: f64,
    inner: Inner,
}

impl RevealTransition {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            clock: 0.0,
            inner: Inner::Idle,
        }
    }

    pub fn state(&self) -> TransitionState {
        match self.inner {
            Inner::Idle => TransitionState::Idle,
            Inner::Armed => TransitionState::Armed,
            Inner::Running { .. } => TransitionState::Running,
            Inner::Complete => TransitionState::Complete,
        }
    }

    /// Arms the transition and plays the win cue exactly once. Any call
    /// after the first is a no-op; the first trigger's captured values
    /// govern the whole transition.
    pub fn trigger(&mut self, feedback: &mut dyn Feedback) {
        if !matches!(self.inner, Inner::Idle) {
            return;
        }
        feedback.play_win_cue();
        feedback.set_blocker(true);
        self.inner = Inner::Armed;
        tracing::debug!("reveal transition armed");
    }

    /// Advances time and, while running, drives the gameplay camera, the
    /// overlay, and the gizmo. An armed transition starts running on this
    /// same tick, so a win applies its first interpolation step in the tick
    /// that latched it.
    pub fn tick(
        &mut self,
        dt: f64,
        gameplay: &mut CameraState,
        reveal: &CameraState,
        feedback: &mut dyn Feedback,
    ) {
        self.clock += dt;

        if matches!(self.inner, Inner::Armed) {
            self.inner = Inner::Running {
                started_at: self.clock,
                from: *gameplay,
            };
        }

        let Inner::Running { started_at, from } = self.inner else {
            return;
        };

        let phase = if self.duration <= 0.0 {
            1.0
        } else {
            ((self.clock - started_at) / self.duration).clamp(0.0, 1.0)
        };

        if phase >= 1.0 {
            // Snap exactly to the destination; element-wise lerp at t=1 can
            // still carry floating-point drift.
            *gameplay = *reveal;
            feedback.set_overlay_alpha(1.0);
            feedback.set_gizmo_scale(0.0);
            self.inner = Inner::Complete;
            tracing::debug!("reveal transition complete");
            return;
        }

        let eased = Ease::InQuad.apply(phase);
        *gameplay = CameraState::lerp(&from, reveal, eased);
        feedback.set_overlay_alpha(phase as f32);
        feedback.set_gizmo_scale((1.0 - phase) as f32);
    }
}
