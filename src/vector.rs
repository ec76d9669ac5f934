//! 2D vector math for steering
//!
//! `glam::Vec2` provides the value type and the arithmetic operators
//! (`+`, `-`, `* f32`, `length`, `distance`). The steering code also needs a
//! few operations with a specific zero-length convention: anything that
//! would divide by zero leaves the vector untouched instead.

use glam::Vec2;

/// World-space position, velocity, acceleration or force
pub type Vector2 = Vec2;

/// Steering operations on a 2D vector. All return new values.
pub trait SteeringVec: Sized {
    /// Divide by a scalar; a zero scalar leaves the vector unchanged
    fn divide(self, scalar: f32) -> Self;
    /// Unit vector in the same direction; `(0, 0)` stays `(0, 0)`
    fn unit(self) -> Self;
    /// Rescale to exactly `magnitude`; `(0, 0)` stays `(0, 0)`
    fn set_magnitude(self, magnitude: f32) -> Self;
    /// Clamp the length to at most `max`, keeping direction
    fn limit(self, max: f32) -> Self;
    /// `atan2(y, x)` in radians
    fn angle(self) -> f32;
    /// Euclidean distance
    fn distance_to(self, other: Self) -> f32;
}

impl SteeringVec for Vec2 {
    #[inline]
    fn divide(self, scalar: f32) -> Self {
        if scalar != 0.0 { self / scalar } else { self }
    }

    #[inline]
    fn unit(self) -> Self {
        let length = self.length();
        self.divide(length)
    }

    #[inline]
    fn set_magnitude(self, magnitude: f32) -> Self {
        self.unit() * magnitude
    }

    #[inline]
    fn limit(self, max: f32) -> Self {
        let length_sq = self.length_squared();
        if length_sq > max * max {
            self.unit() * max
        } else {
            self
        }
    }

    #[inline]
    fn angle(self) -> f32 {
        crate::heading(self)
    }

    #[inline]
    fn distance_to(self, other: Self) -> f32 {
        self.distance(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_conventions() {
        assert_eq!(Vec2::ZERO.unit(), Vec2::ZERO);
        assert_eq!(Vec2::ZERO.set_magnitude(5.0), Vec2::ZERO);
        assert_eq!(Vec2::new(3.0, 4.0).divide(0.0), Vec2::new(3.0, 4.0));
        assert_eq!(Vec2::ZERO.limit(1.0), Vec2::ZERO);
    }

    #[test]
    fn test_set_magnitude() {
        let v = Vec2::new(3.0, 4.0).set_magnitude(10.0);
        assert!((v.length() - 10.0).abs() < 1e-5);
        assert!((v.x - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_limit_keeps_short_vectors() {
        let v = Vec2::new(0.3, 0.4);
        assert_eq!(v.limit(1.0), v);
        let clamped = Vec2::new(30.0, 40.0).limit(5.0);
        assert!((clamped - Vec2::new(3.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn test_distance_and_angle() {
        assert_eq!(Vec2::new(0.0, 0.0).distance_to(Vec2::new(3.0, 4.0)), 5.0);
        assert!((Vec2::new(-1.0, 0.0).angle() - std::f32::consts::PI).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn limit_never_exceeds_max(
            x in -1.0e4f32..1.0e4,
            y in -1.0e4f32..1.0e4,
            max in 0.01f32..100.0,
        ) {
            let v = Vec2::new(x, y).limit(max);
            prop_assert!(v.length() <= max + 1e-3);
        }
    }
}
