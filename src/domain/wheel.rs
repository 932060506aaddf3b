//! Wheels mounted on the robot body.

use super::{Point, Vector};

/// A wheel at a fixed mounting position, given as fractions of the robot width (`rx`) and length
/// (`ry`) measured from the centre. Only the commanded velocity changes after construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Wheel {
    rx: f64,
    ry: f64,
    pub(super) vector: Vector,
}

impl Wheel {
    pub const fn new(rx: f64, ry: f64) -> Self {
        Self {
            rx,
            ry,
            vector: Vector::ZERO,
        }
    }

    /// Last velocity applied by the robot, in robot-frame units per tick.
    pub fn vector(&self) -> Vector {
        self.vector
    }

    /// Mounting position in the robot frame for a body of the given size.
    pub fn mount_point(&self, width: f64, length: f64) -> Point {
        Point::new(width * self.rx, length * self.ry)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_wheel_starts_at_rest() {
        let wheel = Wheel::new(0.5, -0.5);
        assert_abs_diff_eq!(wheel.vector().magnitude(), 0.0);
        assert_abs_diff_eq!(wheel.mount_point(100.0, 100.0), Point::new(50.0, -50.0));
    }

    #[test]
    fn test_wheel_mount_point() {
        let wheel = Wheel::new(-0.5, 0.25);
        assert_abs_diff_eq!(wheel.mount_point(100.0, 80.0), Point::new(-50.0, 20.0));
    }
}
