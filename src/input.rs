use std::f32::consts::PI;
use std::sync::Arc;

use glam::Vec2;
use parking_lot::RwLock;

use crate::motion::Orientation;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

/// Target Y-axis rotation when the pointer sits on the right window edge.
pub const YAW_RANGE: f32 = PI * 1.2;
/// Target X-axis rotation when the pointer sits on the top window edge.
pub const PITCH_RANGE: f32 = PI;

/// Maps window coordinates to `[-1, 1]` on both axes, with Y pointing up.
///
/// Returns `None` for a collapsed window so no NaN or infinite targets leak
/// into the rotation state.
pub fn normalize_pointer(position: Vec2, window: Vec2) -> Option<Vec2> {
    if window.x <= 0.0 || window.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        position.x / window.x * 2.0 - 1.0,
        -(position.y / window.y) * 2.0 + 1.0,
    ))
}

pub fn target_from_pointer(position: Vec2, window: Vec2) -> Option<Orientation> {
    normalize_pointer(position, window).map(|normalized| Orientation {
        x: normalized.y * PITCH_RANGE,
        y: normalized.x * YAW_RANGE,
    })
}

/// Shared target rotation written by pointer and touch input and read by the
/// frame loop. Clones share the same target; the latest event always wins.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    state: Arc<RwLock<TrackerState>>,
}

#[derive(Debug, Default)]
struct TrackerState {
    target: Orientation,
    detached: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a mouse move. Returns whether the target was updated.
    pub fn pointer_moved(&self, position: Vec2, window: Vec2) -> bool {
        match target_from_pointer(position, window) {
            Some(target) => self.store(target),
            None => false,
        }
    }

    /// Handles a touch move using the first active touch point, if any.
    pub fn touch_moved(&self, first_touch: Option<Vec2>, window: Vec2) -> bool {
        match first_touch {
            Some(position) => self.pointer_moved(position, window),
            None => false,
        }
    }

    pub fn target(&self) -> Orientation {
        self.state.read().target
    }

    /// Stops accepting input. Later events are ignored.
    pub fn detach(&self) {
        self.state.write().detached = true;
    }

    pub fn is_attached(&self) -> bool {
        !self.state.read().detached
    }

    fn store(&self, target: Orientation) -> bool {
        let mut state = self.state.write();
        if state.detached {
            return false;
        }
        state.target = target;
        true
    }
}

/// Lifecycle stage of a single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Active touch points in the order they went down, for platforms that
/// report touches one at a time instead of as a list.
#[derive(Debug, Clone, Default)]
pub struct TouchPoints {
    active: Vec<(u64, Vec2)>,
}

impl TouchPoints {
    pub fn update(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        match phase {
            TouchPhase::Started | TouchPhase::Moved => {
                match self.active.iter_mut().find(|(active, _)| *active == id) {
                    Some(entry) => entry.1 = position,
                    None => self.active.push((id, position)),
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.active.retain(|(active, _)| *active != id);
            }
        }
    }

    pub fn first(&self) -> Option<Vec2> {
        self.active.first().map(|(_, position)| *position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Vec2 = Vec2::new(1000.0, 800.0);

    #[test]
    fn center_maps_to_zero_rotation() {
        let target = target_from_pointer(Vec2::new(500.0, 400.0), WINDOW).unwrap();
        assert_eq!(target, Orientation::ZERO);
    }

    #[test]
    fn right_edge_maps_to_full_yaw() {
        let target = target_from_pointer(Vec2::new(1000.0, 400.0), WINDOW).unwrap();
        assert!((target.y - PI * 1.2).abs() < 1e-6);
        assert!(target.x.abs() < 1e-6);
    }

    #[test]
    fn top_edge_maps_to_full_pitch() {
        let normalized = normalize_pointer(Vec2::new(500.0, 0.0), WINDOW).unwrap();
        assert_eq!(normalized, Vec2::new(0.0, 1.0));
        let target = target_from_pointer(Vec2::new(500.0, 0.0), WINDOW).unwrap();
        assert!((target.x - PI).abs() < 1e-6);
    }

    #[test]
    fn collapsed_window_is_ignored() {
        assert!(normalize_pointer(Vec2::new(10.0, 10.0), Vec2::new(0.0, 600.0)).is_none());
        let tracker = PointerTracker::new();
        assert!(!tracker.pointer_moved(Vec2::new(10.0, 10.0), Vec2::ZERO));
        assert_eq!(tracker.target(), Orientation::ZERO);
    }

    #[test]
    fn last_event_wins_across_clones() {
        let tracker = PointerTracker::new();
        let listener = tracker.clone();
        listener.pointer_moved(Vec2::new(0.0, 800.0), WINDOW);
        listener.touch_moved(Some(Vec2::new(1000.0, 0.0)), WINDOW);
        let target = tracker.target();
        assert!((target.x - PI).abs() < 1e-6);
        assert!((target.y - YAW_RANGE).abs() < 1e-6);
    }

    #[test]
    fn touch_without_points_keeps_target() {
        let tracker = PointerTracker::new();
        tracker.pointer_moved(Vec2::new(1000.0, 400.0), WINDOW);
        let before = tracker.target();
        assert!(!tracker.touch_moved(None, WINDOW));
        assert_eq!(tracker.target(), before);
    }

    #[test]
    fn detached_tracker_ignores_input() {
        let tracker = PointerTracker::new();
        tracker.detach();
        assert!(!tracker.is_attached());
        assert!(!tracker.pointer_moved(Vec2::new(1000.0, 0.0), WINDOW));
        assert_eq!(tracker.target(), Orientation::ZERO);
    }

    #[test]
    fn touch_points_follow_the_oldest_active_touch() {
        let mut touches = TouchPoints::default();
        touches.update(7, TouchPhase::Started, Vec2::new(1.0, 1.0));
        touches.update(9, TouchPhase::Started, Vec2::new(5.0, 5.0));
        touches.update(7, TouchPhase::Moved, Vec2::new(2.0, 2.0));
        assert_eq!(touches.first(), Some(Vec2::new(2.0, 2.0)));
        touches.update(7, TouchPhase::Ended, Vec2::new(2.0, 2.0));
        assert_eq!(touches.first(), Some(Vec2::new(5.0, 5.0)));
        touches.update(9, TouchPhase::Cancelled, Vec2::ZERO);
        assert_eq!(touches.first(), None);
    }
}
