use foundation::Millis;
use foundation::math::Vec3;

use crate::easing::Easing;

/// Camera eye position and look-at target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self { eye, target }
    }

    pub fn lerp(self, other: Self, k: f64) -> Self {
        Self {
            eye: self.eye.lerp(other.eye, k),
            target: self.target.lerp(other.target, k),
        }
    }
}

/// One in-progress camera transition. Exists only while flying; a
/// superseding `begin` or a `cancel` destroys it without side effects.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlightState {
    pub start: CameraPose,
    pub end: CameraPose,
    pub started_at: Millis,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl FlightState {
    /// Normalized time, clamped to `[0, 1]`. Non-positive durations
    /// complete immediately.
    pub fn progress(&self, now: Millis) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (now.since(self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn pose_at(&self, now: Millis) -> CameraPose {
        let k = self.easing.apply(self.progress(now));
        self.start.lerp(self.end, k)
    }
}

/// Per-tick outcome of the flight driver.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FlightTick {
    /// No flight active; manual camera control is enabled.
    Idle,
    /// Mid-flight pose for this frame.
    Moving(CameraPose),
    /// The flight just finished: the pose is exactly the end pose, and
    /// this variant is produced exactly once per flight.
    Completed(CameraPose),
}

/// Drives at most one camera flight at a time.
///
/// Starting a new flight mid-flight samples the current interpolated
/// pose as the new start, so the hand-off is visually continuous, and
/// discards the superseded flight without running its completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightDriver {
    active: Option<FlightState>,
}

impl FlightDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&FlightState> {
        self.active.as_ref()
    }

    pub fn begin(
        &mut self,
        from: CameraPose,
        to: CameraPose,
        now: Millis,
        duration_ms: f64,
        easing: Easing,
    ) {
        let start = match &self.active {
            Some(flight) => flight.pose_at(now),
            None => from,
        };
        self.active = Some(FlightState {
            start,
            end: to,
            started_at: now,
            duration_ms,
            easing,
        });
    }

    pub fn tick(&mut self, now: Millis) -> FlightTick {
        let Some(flight) = &self.active else {
            return FlightTick::Idle;
        };
        if flight.progress(now) >= 1.0 {
            let end = flight.end;
            self.active = None;
            return FlightTick::Completed(end);
        }
        FlightTick::Moving(flight.pose_at(now))
    }

    /// Stops immediately, frozen at the current interpolated pose (no
    /// snap to the end values). Returns that pose so callers can leave
    /// the camera where the user interrupted it.
    pub fn cancel(&mut self, now: Millis) -> Option<CameraPose> {
        self.active.take().map(|flight| flight.pose_at(now))
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraPose, FlightDriver, FlightTick};
    use crate::easing::Easing;
    use foundation::Millis;
    use foundation::math::Vec3;

    fn pose(eye_x: f64) -> CameraPose {
        CameraPose::new(Vec3::new(eye_x, 0.0, 0.0), Vec3::ZERO)
    }

    #[test]
    fn idle_driver_reports_idle() {
        let mut driver = FlightDriver::new();
        assert_eq!(driver.tick(Millis(0.0)), FlightTick::Idle);
        assert!(!driver.is_in_flight());
    }

    #[test]
    fn completes_exactly_at_the_end_pose() {
        let mut driver = FlightDriver::new();
        driver.begin(pose(0.0), pose(10.0), Millis(0.0), 1200.0, Easing::InOutCubic);

        assert!(matches!(driver.tick(Millis(600.0)), FlightTick::Moving(_)));
        assert!(driver.is_in_flight());

        // Exactly at the boundary: the pose equals the end pose with no
        // interpolation residue, and the driver goes idle.
        assert_eq!(driver.tick(Millis(1200.0)), FlightTick::Completed(pose(10.0)));
        assert!(!driver.is_in_flight());
        assert_eq!(driver.tick(Millis(1300.0)), FlightTick::Idle);
    }

    #[test]
    fn late_first_tick_still_completes_once() {
        let mut driver = FlightDriver::new();
        driver.begin(pose(0.0), pose(10.0), Millis(0.0), 1200.0, Easing::InOutCubic);
        assert_eq!(
            driver.tick(Millis(5_000.0)),
            FlightTick::Completed(pose(10.0))
        );
        assert_eq!(driver.tick(Millis(5_016.0)), FlightTick::Idle);
    }

    #[test]
    fn supersession_starts_from_the_interpolated_pose() {
        let mut driver = FlightDriver::new();
        driver.begin(pose(0.0), pose(10.0), Millis(0.0), 1000.0, Easing::InOutCubic);

        let mid = match driver.tick(Millis(500.0)) {
            FlightTick::Moving(p) => p,
            other => panic!("expected Moving, got {other:?}"),
        };

        driver.begin(pose(0.0), pose(-5.0), Millis(500.0), 1000.0, Easing::InOutCubic);
        let flight = driver.active().unwrap();
        // No discontinuity: the replacement takes over from where the
        // camera actually was, not from the superseded flight's start.
        assert_eq!(flight.start, mid);
        assert_eq!(flight.end, pose(-5.0));
    }

    #[test]
    fn cancel_freezes_without_snapping() {
        let mut driver = FlightDriver::new();
        driver.begin(pose(0.0), pose(10.0), Millis(0.0), 1000.0, Easing::InOutCubic);

        let frozen = driver.cancel(Millis(500.0)).unwrap();
        assert_eq!(frozen, pose(0.0).lerp(pose(10.0), 0.5));
        assert_ne!(frozen, pose(10.0));
        assert_eq!(driver.tick(Millis(501.0)), FlightTick::Idle);
        assert_eq!(driver.cancel(Millis(502.0)), None);
    }

    #[test]
    fn zero_duration_flight_completes_immediately() {
        let mut driver = FlightDriver::new();
        driver.begin(pose(0.0), pose(10.0), Millis(100.0), 0.0, Easing::OutCubic);
        assert_eq!(
            driver.tick(Millis(100.0)),
            FlightTick::Completed(pose(10.0))
        );
    }

    #[test]
    fn clock_jitter_before_start_clamps_to_the_start_pose() {
        let mut driver = FlightDriver::new();
        driver.begin(pose(2.0), pose(10.0), Millis(1_000.0), 1000.0, Easing::InOutCubic);
        assert_eq!(driver.tick(Millis(900.0)), FlightTick::Moving(pose(2.0)));
    }
}
