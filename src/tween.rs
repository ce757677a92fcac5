use glam::{Mat4, Quat, Vec3};

/// What a tween reports after advancing one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Running,
    Finished,
}

impl Tick {
    pub fn is_finished(self) -> bool {
        self == Self::Finished
    }
}

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec3::lerp(*a, *b, t as f32)
    }
}

impl Lerp for Quat {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.slerp(*b, t as f32)
    }
}

impl Lerp for Mat4 {
    /// Element-wise across all 16 components. Not a decomposed blend; the
    /// reveal transition interpolates raw projection matrices this way.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let av = a.to_cols_array();
        let bv = b.to_cols_array();
        let mut out = [0.0f32; 16];
        for i in 0..16 {
            out[i] = <f32 as Lerp>::lerp(&av[i], &bv[i], t);
        }
        Mat4::from_cols_array(&out)
    }
}

pub fn lerp<T: Lerp>(a: &T, b: &T, t: f64) -> T {
    T::lerp(a, b, t)
}

/// Where `v` sits between `a` and `b`, clamped to [0, 1].
pub fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    if a == b {
        return if v <= a { 0.0 } else { 1.0 };
    }
    ((v - a) / (b - a)).clamp(0.0, 1.0)
}

/// Triangle wave: runs `t` back and forth over [0, length].
pub fn ping_pong(t: f64, length: f64) -> f64 {
    if length <= 0.0 {
        return 0.0;
    }
    let cycle = 2.0 * length;
    let wrapped = t.rem_euclid(cycle);
    length - (wrapped - length).abs()
}

/// Counts down once; resumable replacement for a wait-then-call coroutine.
#[derive(Clone, Copy, Debug)]
pub struct Delay {
    elapsed: f64,
    duration: f64,
}

impl Delay {
    pub fn new(duration: f64) -> Self {
        Self {
            elapsed: 0.0,
            duration,
        }
    }

    pub fn tick(&mut self, dt: f64) -> Tick {
        if self.elapsed >= self.duration {
            return Tick::Finished;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            Tick::Finished
        } else {
            Tick::Running
        }
    }
}

/// Fires immediately and then once per interval, however unevenly the ticks
/// arrive. Returns the number of firings due this tick.
#[derive(Clone, Copy, Debug)]
pub struct Repeat {
    interval: f64,
    since_last: f64,
}

impl Repeat {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            since_last: interval,
        }
    }

    pub fn tick(&mut self, dt: f64) -> u32 {
        self.since_last += dt;
        let mut fires = 0;
        while self.since_last >= self.interval {
            self.since_last -= self.interval;
            fires += 1;
            if self.interval <= 0.0 {
                break;
            }
        }
        fires
    }
}

/// `{elapsed, duration, source, target}` advanced one tick at a time.
/// Lands exactly on the target at the end, never overshooting past it.
#[derive(Clone, Debug)]
pub struct LerpTween<T: Lerp + Clone> {
    source: T,
    target: T,
    elapsed: f64,
    duration: f64,
}

impl<T: Lerp + Clone> LerpTween<T> {
    pub fn new(source: T, target: T, duration: f64) -> Self {
        Self {
            source,
            target,
            elapsed: 0.0,
            duration,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn advance(&mut self, dt: f64) -> T {
        self.elapsed += dt;
        if self.elapsed >= self.duration || self.duration <= 0.0 {
            self.elapsed = self.duration.max(0.0);
            return self.target.clone();
        }
        T::lerp(&self.source, &self.target, self.elapsed / self.duration)
    }
}

/// Moves a transform toward a target pose that may itself move; the target
/// is re-read every tick, the source is captured once.
#[derive(Clone, Debug)]
pub struct MoveTween {
    source_position: Vec3,
    source_rotation: Quat,
    elapsed: f64,
    duration: f64,
}

impl MoveTween {
    pub fn new(source_position: Vec3, source_rotation: Quat, duration: f64) -> Self {
        Self {
            source_position,
            source_rotation,
            elapsed: 0.0,
            duration,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn advance(&mut self, dt: f64, target_position: Vec3, target_rotation: Quat) -> (Vec3, Quat) {
        self.elapsed += dt;
        if self.elapsed >= self.duration || self.duration <= 0.0 {
            self.elapsed = self.duration.max(0.0);
            return (target_position, target_rotation);
        }
        let phase = self.elapsed / self.duration;
        (
            lerp(&self.source_position, &target_position, phase),
            lerp(&self.source_rotation, &target_rotation, phase),
        )
    }
}

/// Scales a transform from its captured scale toward a fixed target scale,
/// landing exactly on the target at the end.
#[derive(Clone, Debug)]
pub struct ScaleTween {
    source: Vec3,
    target: Vec3,
    elapsed: f64,
    duration: f64,
}

impl ScaleTween {
    pub fn new(source: Vec3, target: Vec3, duration: f64) -> Self {
        Self {
            source,
            target,
            elapsed: 0.0,
            duration,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn advance(&mut self, dt: f64) -> Vec3 {
        self.elapsed += dt;
        if self.elapsed >= self.duration || self.duration <= 0.0 {
            self.elapsed = self.duration.max(0.0);
            return self.target;
        }
        lerp(
            &self.source,
            &self.target,
            self.elapsed / self.duration,
        )
    }
}

/// Downward probe into the scene, for placing dropped objects on terrain.
pub trait GroundProbe {
    /// Casts straight down from `origin` and returns the hit point, if any.
    fn probe_down(&self, origin: Vec3) -> Option<Vec3>;
}

/// Drop-in animation for a spawned object: glides from the spawn point to a
/// ring position around it while arcing upward and back down.
#[derive(Clone, Debug)]
pub struct DropTween {
    spawn: Vec3,
    target: Vec3,
    height: f64,
    elapsed: f64,
    duration: f64,
}

impl DropTween {
    /// `angle_deg` picks the landing direction on the ring; the caller owns
    /// randomization. A failed ground probe silently keeps the flat ring
    /// target, trading precision for never aborting the drop.
    pub fn new(
        spawn: Vec3,
        radius: f32,
        height: f64,
        duration: f64,
        angle_deg: f32,
        probe: &dyn GroundProbe,
    ) -> Self {
        let dir = Quat::from_rotation_y(angle_deg.to_radians()) * Vec3::Z;
        let mut target = spawn + dir * radius;

        if let Some(hit) = probe.probe_down(target + Vec3::Y * 100.0)
            && hit.y > target.y
        {
            target = hit + Vec3::Y;
        }

        Self {
            spawn,
            target,
            height,
            elapsed: 0.0,
            duration,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn advance(&mut self, dt: f64) -> Vec3 {
        self.elapsed += dt;
        if self.elapsed >= self.duration || self.duration <= 0.0 {
            self.elapsed = self.duration.max(0.0);
            return self.target;
        }
        let phase = self.elapsed / self.duration;
        let arc = Vec3::Y * (self.height * ping_pong(phase, 0.5)) as f32;
        lerp(&self.spawn, &self.target, phase) + arc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatGround(f32);

    impl GroundProbe for FlatGround {
        fn probe_down(&self, origin: Vec3) -> Option<Vec3> {
            Some(Vec3::new(origin.x, self.0, origin.z))
        }
    }

    struct NoGround;

    impl GroundProbe for NoGround {
        fn probe_down(&self, _origin: Vec3) -> Option<Vec3> {
            None
        }
    }

    #[test]
    fn delay_finishes_once_elapsed() {
        let mut d = Delay::new(1.0);
        assert_eq!(d.tick(0.4), Tick::Running);
        assert_eq!(d.tick(0.4), Tick::Running);
        assert_eq!(d.tick(0.4), Tick::Finished);
        assert_eq!(d.tick(10.0), Tick::Finished);
    }

    #[test]
    fn repeat_fires_immediately_then_per_interval() {
        let mut r = Repeat::new(1.0);
        assert_eq!(r.tick(0.0), 1);
        assert_eq!(r.tick(0.5), 0);
        assert_eq!(r.tick(0.5), 1);
        assert_eq!(r.tick(2.0), 2);
    }

    #[test]
    fn lerp_tween_lands_exactly_on_target() {
        let mut tw = LerpTween::new(0.0f64, 10.0, 1.0);
        assert_eq!(tw.advance(0.5), 5.0);
        assert_eq!(tw.advance(0.6), 10.0);
        assert!(tw.is_finished());
        assert_eq!(tw.advance(0.1), 10.0);
    }

    #[test]
    fn move_tween_tracks_live_target_and_snaps() {
        let mut tw = MoveTween::new(Vec3::ZERO, Quat::IDENTITY, 2.0);
        let target = Vec3::new(10.0, 0.0, 0.0);
        let (pos, _) = tw.advance(1.0, target, Quat::IDENTITY);
        assert!((pos.x - 5.0).abs() < 1e-5);

        let moved = Vec3::new(20.0, 0.0, 0.0);
        let (pos, rot) = tw.advance(1.5, moved, Quat::IDENTITY);
        assert_eq!(pos, moved);
        assert_eq!(rot, Quat::IDENTITY);
        assert!(tw.is_finished());
    }

    #[test]
    fn scale_tween_shrinks_to_target_and_snaps() {
        let mut tw = ScaleTween::new(Vec3::ONE, Vec3::ZERO, 2.0);
        let mid = tw.advance(1.0);
        assert!((mid - Vec3::splat(0.5)).length() < 1e-6);
        assert!(!tw.is_finished());

        let end = tw.advance(1.5);
        assert_eq!(end, Vec3::ZERO);
        assert!(tw.is_finished());
        assert_eq!(tw.advance(0.1), Vec3::ZERO);
    }

    #[test]
    fn mat4_lerp_is_element_wise() {
        let a = Mat4::ZERO;
        let b = Mat4::from_cols_array(&[4.0; 16]);
        let mid = <Mat4 as Lerp>::lerp(&a, &b, 0.25);
        assert_eq!(mid.to_cols_array(), [1.0; 16]);
    }

    #[test]
    fn ping_pong_runs_back_and_forth() {
        assert_eq!(ping_pong(0.0, 0.5), 0.0);
        assert_eq!(ping_pong(0.5, 0.5), 0.5);
        assert_eq!(ping_pong(0.75, 0.5), 0.25);
        assert_eq!(ping_pong(1.0, 0.5), 0.0);
    }

    #[test]
    fn inverse_lerp_clamps_and_handles_degenerate_span() {
        assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
        assert_eq!(inverse_lerp(0.0, 10.0, -5.0), 0.0);
        assert_eq!(inverse_lerp(0.0, 10.0, 15.0), 1.0);
        assert_eq!(inverse_lerp(3.0, 3.0, 2.0), 0.0);
        assert_eq!(inverse_lerp(3.0, 3.0, 4.0), 1.0);
    }

    #[test]
    fn drop_raises_target_onto_higher_ground() {
        let spawn = Vec3::ZERO;
        let mut tw = DropTween::new(spawn, 2.0, 1.0, 1.0, 0.0, &FlatGround(3.0));
        let landed = loop {
            let p = tw.advance(0.25);
            if tw.is_finished() {
                break p;
            }
        };
        // Ground at y=3 is above the flat ring target, so land one unit over it.
        assert_eq!(landed.y, 4.0);
    }

    #[test]
    fn drop_falls_back_to_ring_target_without_ground() {
        let spawn = Vec3::new(1.0, 0.0, 1.0);
        let mut tw = DropTween::new(spawn, 2.0, 1.0, 1.0, 0.0, &NoGround);
        let landed = loop {
            let p = tw.advance(0.25);
            if tw.is_finished() {
                break p;
            }
        };
        assert!((landed - (spawn + Vec3::Z * 2.0)).length() < 1e-5);
    }

    #[test]
    fn drop_arcs_upward_mid_flight() {
        let mut tw = DropTween::new(Vec3::ZERO, 4.0, 2.0, 1.0, 0.0, &NoGround);
        let quarter = tw.advance(0.25);
        // ping_pong(0.25, 0.5) = 0.25, height 2 -> +0.5 over the lerp line.
        assert!((quarter.y - 0.5).abs() < 1e-5);
        let half = tw.advance(0.25);
        assert!((half.y - 1.0).abs() < 1e-5);
    }
}
