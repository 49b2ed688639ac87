//! Mapping of drag, wheel and keyboard input onto deck directions.

use kurbo::Vec2;

use super::config::DeckConfig;

/// Direction of a card change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// Infer the direction of a jump from `from` to `to`.
    pub fn between(from: usize, to: usize) -> Self {
        if to > from { Self::Next } else { Self::Prev }
    }

    /// Neighbor of `index` in this direction, wrapping around `len` cards.
    pub fn step(self, index: usize, len: usize) -> usize {
        match self {
            Self::Next => (index + 1) % len,
            Self::Prev => (index + len - 1) % len,
        }
    }
}

/// Direction bound to a key, by `KeyboardEvent.key` name.
pub fn key_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | " " => Some(Direction::Prev),
        "ArrowDown" => Some(Direction::Next),
        _ => None,
    }
}

/// Direction of a wheel gesture, if it is mostly vertical.
pub fn wheel_direction(delta: Vec2) -> Option<Direction> {
    if delta.y.abs() <= delta.x.abs() {
        return None;
    }
    Some(if delta.y > 0.0 {
        Direction::Next
    } else {
        Direction::Prev
    })
}

/// Direction a finished drag commits to, if it went far enough.
///
/// Dragging down reveals the previous card, dragging up the next one.
pub fn drag_direction(distance: f64, config: &DeckConfig) -> Option<Direction> {
    if distance.abs() <= config.drag_threshold {
        return None;
    }
    Some(if distance > 0.0 {
        Direction::Prev
    } else {
        Direction::Next
    })
}

/// Transient offset and opacity of the active card during a drag.
///
/// Returns `None` while the drag is too short to show.
pub fn drag_feedback(distance: f64, config: &DeckConfig) -> Option<(f64, f64)> {
    let magnitude = distance.abs();
    if magnitude <= config.drag_feedback_min {
        return None;
    }
    let offset = (magnitude * config.drag_damping).min(config.drag_max_offset) * distance.signum();
    let opacity = (1.0 - magnitude / config.drag_fade_divisor).max(0.0);
    Some((offset, opacity))
}

/// Vertical pointer tracking between press and release.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    start_y: f64,
    current_y: f64,
    active: bool,
    /// The active card currently shows drag feedback.
    displaced: bool,
}

impl DragTracker {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_displaced(&self) -> bool {
        self.displaced
    }

    pub fn begin(&mut self, y: f64) {
        self.active = true;
        self.displaced = false;
        self.start_y = y;
        self.current_y = y;
    }

    /// Record a pointer move. Returns the total distance from the start.
    pub fn update(&mut self, y: f64) -> Option<f64> {
        if !self.active {
            return None;
        }
        self.current_y = y;
        Some(self.distance())
    }

    pub fn mark_displaced(&mut self, displaced: bool) {
        self.displaced = displaced;
    }

    /// Finish the drag. Returns the total distance and whether feedback
    /// was showing.
    pub fn end(&mut self, y: f64) -> Option<(f64, bool)> {
        if !self.active {
            return None;
        }
        self.current_y = y;
        self.active = false;
        let displaced = std::mem::take(&mut self.displaced);
        Some((self.distance(), displaced))
    }

    pub fn distance(&self) -> f64 {
        self.current_y - self.start_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wraps() {
        assert_eq!(Direction::Next.step(4, 5), 0);
        assert_eq!(Direction::Prev.step(0, 5), 4);
        assert_eq!(Direction::Next.step(0, 1), 0);
        assert_eq!(Direction::Prev.step(0, 1), 0);
    }

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between(1, 3), Direction::Next);
        assert_eq!(Direction::between(3, 1), Direction::Prev);
    }

    #[test]
    fn test_keys() {
        assert_eq!(key_direction("ArrowUp"), Some(Direction::Prev));
        assert_eq!(key_direction(" "), Some(Direction::Prev));
        assert_eq!(key_direction("ArrowDown"), Some(Direction::Next));
        assert_eq!(key_direction("ArrowLeft"), None);
        assert_eq!(key_direction("Enter"), None);
    }

    #[test]
    fn test_wheel() {
        assert_eq!(wheel_direction(Vec2::new(0.0, 40.0)), Some(Direction::Next));
        assert_eq!(wheel_direction(Vec2::new(3.0, -12.0)), Some(Direction::Prev));
        assert_eq!(wheel_direction(Vec2::new(30.0, 12.0)), None);
        assert_eq!(wheel_direction(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_drag_commit() {
        let config = DeckConfig::stacking();
        assert_eq!(drag_direction(-60.0, &config), Some(Direction::Next));
        assert_eq!(drag_direction(60.0, &config), Some(Direction::Prev));
        assert_eq!(drag_direction(50.0, &config), None);
        assert_eq!(drag_direction(-12.0, &config), None);
    }

    #[test]
    fn test_drag_feedback_damped_and_clamped() {
        let config = DeckConfig::stacking();
        assert!(drag_feedback(10.0, &config).is_none());

        let (offset, opacity) = drag_feedback(-60.0, &config).unwrap();
        assert!((offset - -12.0).abs() < 1e-9);
        assert!((opacity - 0.8).abs() < 1e-9);

        let (offset, opacity) = drag_feedback(400.0, &config).unwrap();
        assert!((offset - 30.0).abs() < f64::EPSILON);
        assert!(opacity.abs() < f64::EPSILON);
    }

    #[test]
    fn test_tracker() {
        let mut tracker = DragTracker::default();
        assert!(tracker.update(5.0).is_none());
        assert!(tracker.end(5.0).is_none());

        tracker.begin(200.0);
        assert_eq!(tracker.update(180.0), Some(-20.0));
        tracker.mark_displaced(true);
        assert_eq!(tracker.end(140.0), Some((-60.0, true)));
        assert!(!tracker.is_active());
        assert!(!tracker.is_displaced());
    }
}
