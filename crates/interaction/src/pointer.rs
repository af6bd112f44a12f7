use foundation::Millis;
use foundation::math::Vec2;

/// Drag-versus-click discrimination tunables.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerConfig {
    /// Pointer-up farther than this from pointer-down is a drag.
    pub drag_threshold_px: f64,
    /// How long clicks stay suppressed after a drag ends.
    pub suppress_cooldown_ms: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 8.0,
            suppress_cooldown_ms: 250.0,
        }
    }
}

/// Tracks one pointer so rotate-drag gestures don't register as
/// selection clicks: the click event that follows a drag release lands
/// inside the cooldown window and is discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerTracker {
    config: PointerConfig,
    down_at: Option<Vec2>,
    suppress_until: Option<Millis>,
}

impl PointerTracker {
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            down_at: None,
            suppress_until: None,
        }
    }

    pub fn on_pointer_down(&mut self, pos_px: Vec2) {
        self.down_at = Some(pos_px);
    }

    pub fn on_pointer_up(&mut self, pos_px: Vec2, now: Millis) {
        let Some(down) = self.down_at.take() else {
            return;
        };
        if (pos_px - down).length() > self.config.drag_threshold_px {
            self.suppress_until = Some(now + self.config.suppress_cooldown_ms);
        }
    }

    /// Whether a click arriving at `now` should carry its semantic
    /// action.
    pub fn click_allowed(&self, now: Millis) -> bool {
        match self.suppress_until {
            Some(until) => now.since(until) >= 0.0,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PointerConfig, PointerTracker};
    use foundation::Millis;
    use foundation::math::Vec2;

    #[test]
    fn stationary_press_keeps_clicks_live() {
        let mut tracker = PointerTracker::new(PointerConfig::default());
        tracker.on_pointer_down(Vec2::new(100.0, 100.0));
        tracker.on_pointer_up(Vec2::new(100.0, 100.0), Millis(50.0));
        assert!(tracker.click_allowed(Millis(51.0)));
    }

    #[test]
    fn drag_release_suppresses_the_following_click() {
        let mut tracker = PointerTracker::new(PointerConfig::default());
        tracker.on_pointer_down(Vec2::new(100.0, 100.0));
        tracker.on_pointer_up(Vec2::new(400.0, 300.0), Millis(50.0));
        assert!(!tracker.click_allowed(Millis(51.0)));
        // The window closes after the cooldown.
        assert!(tracker.click_allowed(Millis(300.0)));
    }

    #[test]
    fn wobble_under_the_threshold_is_not_a_drag() {
        let mut tracker = PointerTracker::new(PointerConfig::default());
        tracker.on_pointer_down(Vec2::new(100.0, 100.0));
        tracker.on_pointer_up(Vec2::new(104.0, 103.0), Millis(50.0));
        assert!(tracker.click_allowed(Millis(51.0)));
    }

    #[test]
    fn up_without_down_is_ignored() {
        let mut tracker = PointerTracker::new(PointerConfig::default());
        tracker.on_pointer_up(Vec2::new(400.0, 300.0), Millis(50.0));
        assert!(tracker.click_allowed(Millis(51.0)));
    }
}
