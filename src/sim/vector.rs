//! Immutable 2D vector
//!
//! Thin value type over `glam::DVec2`. Every operation returns a new value.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult, require_finite};

/// Fields are public like `glam::DVec2`; the crate replaces whole values and
/// never edits a component in place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build from caller input, rejecting NaN and infinities
    pub fn try_new(what: &'static str, x: f64, y: f64) -> SimResult<Self> {
        Ok(Self::new(require_finite(what, x)?, require_finite(what, y)?))
    }

    #[inline]
    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.as_dvec2().is_finite()
    }

    /// Euclidean length
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.as_dvec2().length()
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.as_dvec2().dot(other.as_dvec2())
    }

    /// Scalar 2D cross product: `x * other.y - y * other.x`
    #[inline]
    pub fn cross(self, other: Self) -> f64 {
        self.as_dvec2().perp_dot(other.as_dvec2())
    }

    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        self.as_dvec2().distance_squared(other.as_dvec2())
    }

    /// Unsigned angle between the two vectors, in degrees
    ///
    /// Undefined when either vector has zero length (or is not finite);
    /// reported as `SimError::DomainError` instead of returning NaN.
    pub fn angle_to(self, other: Self) -> SimResult<f64> {
        let (a, b) = match (self.unit_scaled(), other.unit_scaled()) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(SimError::DomainError(format!(
                    "angle between {self} and {other} is undefined"
                )));
            }
        };
        Ok(a.perp_dot(b).abs().atan2(a.dot(b)).to_degrees())
    }

    /// Same direction, largest component scaled to 1 so products cannot overflow
    fn unit_scaled(self) -> Option<DVec2> {
        let v = self.as_dvec2();
        let scale = v.abs().max_element();
        (v.is_finite() && scale > 0.0).then(|| v / scale)
    }
}

impl From<DVec2> for Vector2D {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D> for DVec2 {
    fn from(v: Vector2D) -> Self {
        v.as_dvec2()
    }
}

impl From<(f64, f64)> for Vector2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        (self.as_dvec2() + rhs.as_dvec2()).into()
    }
}

impl Sub for Vector2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        (self.as_dvec2() - rhs.as_dvec2()).into()
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        (self.as_dvec2() * rhs).into()
    }
}

impl Neg for Vector2D {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_magnitude_dot_cross() {
        let a = Vector2D::new(3.0, 4.0);
        let b = Vector2D::new(-2.0, 1.0);
        assert_eq!(a.magnitude(), 5.0);
        assert_eq!(a.dot(b), -2.0);
        assert_eq!(a.cross(b), 3.0 * 1.0 - 4.0 * -2.0);
    }

    #[test]
    fn test_angle_to() {
        let x = Vector2D::new(1.0, 0.0);
        let y = Vector2D::new(0.0, 2.0);
        assert!((x.angle_to(y).unwrap() - 90.0).abs() < 1e-9);
        assert!((x.angle_to(-x).unwrap() - 180.0).abs() < 1e-9);
        assert_eq!(x.angle_to(x * 3.0).unwrap(), 0.0);
    }

    #[test]
    fn test_angle_to_zero_vector_is_domain_error() {
        let x = Vector2D::new(1.0, 0.0);
        assert!(matches!(x.angle_to(Vector2D::ZERO), Err(SimError::DomainError(_))));
        assert!(matches!(Vector2D::ZERO.angle_to(x), Err(SimError::DomainError(_))));
    }

    #[test]
    fn test_angle_to_huge_vectors() {
        let a = Vector2D::new(1e200, 0.0);
        let b = Vector2D::new(0.0, 1e200);
        assert!((a.angle_to(b).unwrap() - 90.0).abs() < 1e-9);
        let c = Vector2D::new(1e300, 1e300);
        assert!((a.angle_to(c).unwrap() - 45.0).abs() < 1e-9);
        assert!(a.angle_to(Vector2D::new(f64::INFINITY, 0.0)).is_err());
    }

    #[test]
    fn test_try_new_rejects_non_finite() {
        assert!(Vector2D::try_new("velocity", 1.0, f64::NAN).is_err());
        assert!(Vector2D::try_new("velocity", f64::NEG_INFINITY, 0.0).is_err());
        assert_eq!(Vector2D::try_new("velocity", 1.0, 2.0), Ok(Vector2D::new(1.0, 2.0)));
    }

    proptest! {
        #[test]
        fn prop_cross_is_antisymmetric(ax in -1e3..1e3f64, ay in -1e3..1e3f64, bx in -1e3..1e3f64, by in -1e3..1e3f64) {
            let a = Vector2D::new(ax, ay);
            let b = Vector2D::new(bx, by);
            prop_assert_eq!(a.cross(b), -b.cross(a));
            prop_assert_eq!(a.dot(b), b.dot(a));
        }

        #[test]
        fn prop_angle_in_range(ax in 0.1..1e3f64, ay in -1e3..1e3f64, bx in -1e3..1e3f64, by in 0.1..1e3f64) {
            let angle = Vector2D::new(ax, ay).angle_to(Vector2D::new(bx, by)).unwrap();
            prop_assert!((0.0..=180.0).contains(&angle));
        }
    }
}
