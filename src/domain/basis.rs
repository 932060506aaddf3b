//! Basic building blocks.

use std::{
    f64::consts::{PI, TAU},
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn distance(&self, point: Self) -> f64 {
        ((self.x - point.x).powi(2) + (self.y - point.y).powi(2)).sqrt()
    }

    pub fn rotate_vector(&self, angle: Angle) -> Point {
        Point::new(
            self.x * angle.0.cos() - self.y * angle.0.sin(),
            self.x * angle.0.sin() + self.y * angle.0.cos(),
        )
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

impl From<Point> for (f32, f32) {
    fn from(value: Point) -> Self {
        (value.x as f32, value.y as f32)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Self::Output {
        Self {
            x: self.x + rhs.x(),
            y: self.y + rhs.y(),
        }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Angle in radians, measured counter-clockwise from the positive x-axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub const fn new(radians: f64) -> Self {
        Self(radians)
    }

    pub fn to_deg(self) -> f64 {
        (self.0 * (180.0 / PI) + 360.0) % 360.0
    }

    /// Same direction, wrapped into `[0, 2π)`.
    pub fn normalized(self) -> Self {
        let radians = self.0.rem_euclid(TAU);
        // rem_euclid may round up to TAU for tiny negative inputs
        Self(if radians >= TAU { 0.0 } else { radians })
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Angle(-self.0)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl From<Angle> for f64 {
    fn from(value: Angle) -> Self {
        value.0
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum VectorError {
    #[error("vector magnitude must not be negative, got {0}")]
    NegativeMagnitude(f64),
    #[error("vector magnitude must be finite, got {0}")]
    NonFiniteMagnitude(f64),
}

/// Immutable 2D vector kept in polar form. The magnitude is never negative and the bearing is
/// normalized to `[0, 2π)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Vector {
    magnitude: f64,
    bearing: Angle,
}

impl Vector {
    pub const ZERO: Vector = Vector {
        magnitude: 0.0,
        bearing: Angle::new(0.0),
    };

    pub fn from_cartesian(x: f64, y: f64) -> Self {
        Self {
            magnitude: x.hypot(y),
            bearing: Angle::new(y.atan2(x)).normalized(),
        }
    }

    pub fn from_polar(magnitude: f64, bearing: Angle) -> Result<Self, VectorError> {
        if !magnitude.is_finite() {
            return Err(VectorError::NonFiniteMagnitude(magnitude));
        }
        if magnitude < 0.0 {
            return Err(VectorError::NegativeMagnitude(magnitude));
        }
        Ok(Self {
            magnitude,
            bearing: bearing.normalized(),
        })
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn bearing(&self) -> Angle {
        self.bearing
    }

    pub fn x(&self) -> f64 {
        self.magnitude * self.bearing.0.cos()
    }

    pub fn y(&self) -> f64 {
        self.magnitude * self.bearing.0.sin()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Self) -> Self::Output {
        Vector::from_cartesian(self.x() + rhs.x(), self.y() + rhs.y())
    }
}

/// Scaling by a negative factor flips the bearing.
impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Self::Output {
        if rhs < 0.0 {
            Self {
                magnitude: self.magnitude * -rhs,
                bearing: (self.bearing + Angle::new(PI)).normalized(),
            }
        } else {
            Self {
                magnitude: self.magnitude * rhs,
                bearing: self.bearing,
            }
        }
    }
}

impl From<Vector> for Point {
    fn from(value: Vector) -> Self {
        Point::new(value.x(), value.y())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::{assert_abs_diff_eq, AbsDiffEq};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_point() {
        let point = Point::new(1.0, 2.0);
        assert_abs_diff_eq!(point.x(), 1.0);
        assert_abs_diff_eq!(point.y(), 2.0);
        assert_abs_diff_eq!(point + Point::new(0.5, -1.0), Point::new(1.5, 1.0));
        assert_abs_diff_eq!(point - Point::new(0.5, -1.0), Point::new(0.5, 3.0));
        assert_abs_diff_eq!(point * 2.0, Point::new(2.0, 4.0));
    }

    #[rstest]
    #[case(Angle::new(0.0), 0.0)]
    #[case(Angle::new(0.5 * PI), 90.0)]
    #[case(Angle::new(1.0 * PI), 180.0)]
    #[case(Angle::new(1.5 * PI), 270.0)]
    #[case(Angle::new(2.0 * PI), 0.0)]
    fn test_angle_to_deg(#[case] angle: Angle, #[case] expected: f64) {
        assert_abs_diff_eq!(angle.to_deg(), expected);
    }

    #[rstest]
    #[case::zero(0.0, 0.0)]
    #[case::full_turn(2.0 * PI, 0.0)]
    #[case::negative(-0.5 * PI, 1.5 * PI)]
    #[case::several_turns(5.0 * PI, PI)]
    #[case::tiny_negative(-1e-18, 0.0)]
    fn test_angle_normalized(#[case] radians: f64, #[case] expected: f64) {
        let normalized: f64 = Angle::new(radians).normalized().into();
        assert_abs_diff_eq!(normalized, expected, epsilon = EPSILON);
        assert!((0.0..2.0 * PI).contains(&normalized));
    }

    #[rstest]
    #[case::right(1.0, 0.0, 1.0, 0.0)]
    #[case::up(0.0, 2.0, 2.0, 0.5 * PI)]
    #[case::left(-3.0, 0.0, 3.0, PI)]
    #[case::down(0.0, -1.0, 1.0, 1.5 * PI)]
    #[case::diagonal(1.0, 1.0, f64::sqrt(2.0), 0.25 * PI)]
    fn test_vector_from_cartesian(
        #[case] x: f64,
        #[case] y: f64,
        #[case] magnitude: f64,
        #[case] bearing: f64,
    ) {
        let vector = Vector::from_cartesian(x, y);
        assert_abs_diff_eq!(vector.magnitude(), magnitude, epsilon = EPSILON);
        assert_abs_diff_eq!(vector.bearing(), Angle::new(bearing), epsilon = EPSILON);
        assert_abs_diff_eq!(vector.x(), x, epsilon = EPSILON);
        assert_abs_diff_eq!(vector.y(), y, epsilon = EPSILON);
    }

    #[test]
    fn test_vector_from_polar_rejects_negative_magnitude() {
        assert_eq!(
            Vector::from_polar(-1.0, Angle::new(0.0)),
            Err(VectorError::NegativeMagnitude(-1.0))
        );
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    #[case::negative_infinite(f64::NEG_INFINITY)]
    fn test_vector_from_polar_rejects_non_finite_magnitude(#[case] magnitude: f64) {
        assert!(matches!(
            Vector::from_polar(magnitude, Angle::new(0.0)),
            Err(VectorError::NonFiniteMagnitude(_))
        ));
    }

    #[test]
    fn test_vector_polar_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let magnitude = rng.random_range(0.0..=1000.0);
            let bearing = rng.random_range(-10.0 * PI..=10.0 * PI);
            let vector = Vector::from_polar(magnitude, Angle::new(bearing)).unwrap();

            assert_abs_diff_eq!(vector.magnitude(), magnitude);
            assert_abs_diff_eq!(
                vector.bearing(),
                Angle::new(bearing.rem_euclid(2.0 * PI)),
                epsilon = EPSILON
            );

            let rebuilt = Vector::from_cartesian(vector.x(), vector.y());
            let tolerance = 1e-9 * magnitude.max(1.0);
            assert_abs_diff_eq!(rebuilt.magnitude(), magnitude, epsilon = tolerance);
            if magnitude > 1e-6 {
                assert_abs_diff_eq!(rebuilt, vector, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_vector_zero_magnitude() {
        let vector = Vector::from_polar(0.0, Angle::new(1.0)).unwrap();
        assert_abs_diff_eq!(vector.x(), 0.0);
        assert_abs_diff_eq!(vector.y(), 0.0);
        assert_abs_diff_eq!(Vector::from_cartesian(0.0, 0.0).magnitude(), 0.0);
    }

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector::from_cartesian(1.0, 0.0);
        let b = Vector::from_cartesian(0.0, 1.0);
        assert_abs_diff_eq!(a + b, Vector::from_cartesian(1.0, 1.0), epsilon = EPSILON);
        assert_abs_diff_eq!(a * 3.0, Vector::from_cartesian(3.0, 0.0), epsilon = EPSILON);
        assert_abs_diff_eq!(a * -2.0, Vector::from_cartesian(-2.0, 0.0), epsilon = EPSILON);
        assert_abs_diff_eq!(Point::new(1.0, 1.0) + b, Point::new(1.0, 2.0), epsilon = EPSILON);
    }

    impl AbsDiffEq for Point {
        type Epsilon = f64;

        fn default_epsilon() -> f64 {
            f64::EPSILON
        }

        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            f64::abs_diff_eq(&self.x, &other.x, epsilon)
                && f64::abs_diff_eq(&self.y, &other.y, epsilon)
        }
    }

    impl AbsDiffEq for Angle {
        type Epsilon = f64;

        fn default_epsilon() -> f64 {
            f64::EPSILON
        }

        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            f64::abs_diff_eq(&self.0, &other.0, epsilon)
        }
    }

    /// Compares cartesian components so that bearings of tiny vectors do not matter.
    impl AbsDiffEq for Vector {
        type Epsilon = f64;

        fn default_epsilon() -> f64 {
            f64::EPSILON
        }

        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            f64::abs_diff_eq(&self.x(), &other.x(), epsilon)
                && f64::abs_diff_eq(&self.y(), &other.y(), epsilon)
        }
    }
}
