//! Easing curves: pure functions from normalized time `[0, 1]` to a
//! progress value, independent of any animation driver.

/// Named curve selection for animation state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Easing {
    /// Symmetric acceleration/deceleration; the default arrival feel.
    InOutCubic,
    /// Fast start, gentle settle; used for return-home transitions.
    OutCubic,
    /// Settles from beyond the target; marker pop-in emphasis only,
    /// never camera motion.
    OutBack,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::InOutCubic => ease_in_out_cubic(t),
            Easing::OutCubic => ease_out_cubic(t),
            Easing::OutBack => ease_out_back(t),
        }
    }
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Overshoot constant for [`ease_out_back`].
const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;

pub fn ease_out_back(t: f64) -> f64 {
    let u = t - 1.0;
    1.0 + BACK_C3 * u * u * u + BACK_C1 * u * u
}

/// Pop-in scale for a freshly placed marker: overshoots slightly past
/// full size, then settles. Elapsed times beyond the window clamp to 1.
pub fn pop_in_scale(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    ease_out_back((elapsed_ms / duration_ms).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::{Easing, ease_in_out_cubic, ease_out_back, ease_out_cubic, pop_in_scale};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn in_out_cubic_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_close(ease_in_out_cubic(0.5), 0.5, 1e-12);
        // Slow start: well under linear at t = 0.25.
        assert!(ease_in_out_cubic(0.25) < 0.25);
        // Symmetric about the midpoint.
        assert_close(
            ease_in_out_cubic(0.25) + ease_in_out_cubic(0.75),
            1.0,
            1e-12,
        );
    }

    #[test]
    fn out_cubic_endpoints_and_shape() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        // Fast start: ahead of linear everywhere inside the interval.
        assert!(ease_out_cubic(0.25) > 0.25);
        assert!(ease_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn out_back_overshoots_then_settles() {
        assert_eq!(ease_out_back(0.0), 0.0);
        assert_close(ease_out_back(1.0), 1.0, 1e-12);
        // The defining property: it passes beyond the target.
        assert!(ease_out_back(0.8) > 1.0);
    }

    #[test]
    fn enum_dispatch_matches_free_functions() {
        for &t in &[0.0, 0.2, 0.5, 0.9, 1.0] {
            assert_eq!(Easing::InOutCubic.apply(t), ease_in_out_cubic(t));
            assert_eq!(Easing::OutCubic.apply(t), ease_out_cubic(t));
            assert_eq!(Easing::OutBack.apply(t), ease_out_back(t));
        }
    }

    #[test]
    fn pop_in_scale_clamps_and_degrades() {
        assert_eq!(pop_in_scale(0.0, 350.0), 0.0);
        assert_close(pop_in_scale(350.0, 350.0), 1.0, 1e-12);
        assert_close(pop_in_scale(10_000.0, 350.0), 1.0, 1e-12);
        assert_eq!(pop_in_scale(100.0, 0.0), 1.0);
    }
}
