//! Host-side input translation: keyboard names and touch swipes to a
//! [`Direction`]. Nothing here touches game state.

use serde::{Deserialize, Serialize};

use crate::engine::Direction;

/// Swipe recognition knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Minimum travel (in host units, e.g. CSS pixels) along the dominant axis.
    pub threshold: f32,
    /// Ignore gestures that involved more than one touch point.
    pub single_touch_only: bool,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self { threshold: 30.0, single_touch_only: true }
    }
}

/// A completed touch gesture: start-to-end displacement and touch count.
///
/// `dy` grows downward, as in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub dx: f32,
    pub dy: f32,
    pub touches: usize,
}

impl Swipe {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy, touches: 1 }
    }
}

/// Translate a swipe into a direction, or `None` if it is too short or
/// otherwise rejected. The dominant axis wins; an exact tie counts as vertical.
///
/// ```
/// use slide_2048::engine::Direction;
/// use slide_2048::input::{direction_from_swipe, Swipe, SwipeConfig};
/// let cfg = SwipeConfig::default();
/// assert_eq!(direction_from_swipe(Swipe::new(-80.0, 10.0), &cfg), Some(Direction::Left));
/// assert_eq!(direction_from_swipe(Swipe::new(5.0, 12.0), &cfg), None);
/// ```
pub fn direction_from_swipe(swipe: Swipe, cfg: &SwipeConfig) -> Option<Direction> {
    if swipe.touches == 0 || (cfg.single_touch_only && swipe.touches > 1) {
        return None;
    }
    if !swipe.dx.is_finite() || !swipe.dy.is_finite() {
        return None;
    }
    let abs_x = swipe.dx.abs();
    let abs_y = swipe.dy.abs();
    if abs_x < cfg.threshold && abs_y < cfg.threshold {
        return None;
    }
    let dir = if abs_x > abs_y {
        if swipe.dx > 0.0 { Direction::Right } else { Direction::Left }
    } else if swipe.dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    Some(dir)
}

/// Map a key name to a direction: browser `KeyboardEvent.key` arrow names,
/// WASD and vi keys.
pub fn direction_from_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" | "k" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" | "j" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" | "h" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" | "l" => Some(Direction::Right),
        other => other.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_swipes_are_ignored() {
        let cfg = SwipeConfig::default();
        assert_eq!(direction_from_swipe(Swipe::new(29.9, -29.9), &cfg), None);
        assert_eq!(direction_from_swipe(Swipe::new(0.0, 0.0), &cfg), None);
    }

    #[test]
    fn dominant_axis_wins() {
        let cfg = SwipeConfig::default();
        assert_eq!(direction_from_swipe(Swipe::new(40.0, 39.0), &cfg), Some(Direction::Right));
        assert_eq!(direction_from_swipe(Swipe::new(-10.0, 31.0), &cfg), Some(Direction::Down));
        assert_eq!(direction_from_swipe(Swipe::new(10.0, -31.0), &cfg), Some(Direction::Up));
        assert_eq!(direction_from_swipe(Swipe::new(-50.0, 50.0), &cfg), Some(Direction::Down));
    }

    #[test]
    fn threshold_is_configurable() {
        let cfg = SwipeConfig { threshold: 20.0, single_touch_only: false };
        assert_eq!(direction_from_swipe(Swipe::new(-25.0, 0.0), &cfg), Some(Direction::Left));
        let multi = Swipe { dx: -25.0, dy: 0.0, touches: 2 };
        assert_eq!(direction_from_swipe(multi, &cfg), Some(Direction::Left));
        assert_eq!(direction_from_swipe(multi, &SwipeConfig { threshold: 20.0, ..Default::default() }), None);
    }

    #[test]
    fn keys_map_to_directions() {
        assert_eq!(direction_from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(direction_from_key("w"), Some(Direction::Up));
        assert_eq!(direction_from_key("right"), Some(Direction::Right));
        assert_eq!(direction_from_key("Enter"), None);
    }
}
