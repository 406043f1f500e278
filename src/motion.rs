use serde::{Deserialize, Serialize};

/// Fraction of the remaining distance to the target covered each frame.
pub const DAMPING_FACTOR: f32 = 0.07;

/// Rotation of the mesh around its X and Y axes, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
}

impl Orientation {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Moves `current` a fixed fraction of the way towards `target`.
pub fn damp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Exponentially eased orientation that follows a moving target.
///
/// Each step closes [`DAMPING_FACTOR`] of the gap on both axes
/// independently, so the current value converges on the target without ever
/// overshooting it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DampedRotation {
    current: Orientation,
}

impl DampedRotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Orientation {
        self.current
    }

    pub fn step(&mut self, target: Orientation) -> Orientation {
        self.current = Orientation {
            x: damp(self.current.x, target.x, DAMPING_FACTOR),
            y: damp(self.current.y, target.y, DAMPING_FACTOR),
        };
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_at_target_is_a_fixed_point() {
        let mut rotation = DampedRotation::new();
        assert_eq!(rotation.step(Orientation::ZERO), Orientation::ZERO);

        let target = Orientation::new(1.25, -0.5);
        let mut rotation = DampedRotation { current: target };
        assert_eq!(rotation.step(target), target);
    }

    #[test]
    fn single_step_covers_the_damping_fraction() {
        let mut rotation = DampedRotation::new();
        let next = rotation.step(Orientation::new(1.0, -2.0));
        assert!((next.x - 0.07).abs() < 1e-6);
        assert!((next.y + 0.14).abs() < 1e-6);
    }

    #[test]
    fn converges_monotonically_without_overshoot() {
        let target = Orientation::new(std::f32::consts::PI, -3.7);
        let mut rotation = DampedRotation::new();
        let mut gap_x = (target.x - rotation.current().x).abs();
        let mut gap_y = (target.y - rotation.current().y).abs();
        for _ in 0..60 {
            let current = rotation.step(target);
            let next_x = (target.x - current.x).abs();
            let next_y = (target.y - current.y).abs();
            assert!(next_x < gap_x);
            assert!(next_y < gap_y);
            assert!(current.x <= target.x);
            assert!(current.y >= target.y);
            gap_x = next_x;
            gap_y = next_y;
        }
        for _ in 0..400 {
            rotation.step(target);
        }
        assert!((rotation.current().x - target.x).abs() < 1e-4);
        assert!((rotation.current().y - target.y).abs() < 1e-4);
    }
}
