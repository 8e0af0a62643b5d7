//! 2D points and the exact Euclidean distance used throughout the engine.
//!
//! A run operates over an ordered sequence of points; the order carries no
//! geometric meaning, it only defines the stable index that aligns each
//! point with its row in the membership matrix.

/// A 2D point with finite coordinates.
///
/// Finiteness is not enforced by construction; the engine validates it once
/// at initialization and rejects non-finite coordinates as
/// [`InvalidParameter::NonFinitePoint`].
///
/// [`InvalidParameter::NonFinitePoint`]: crate::error::InvalidParameter::NonFinitePoint
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Exact Euclidean distance to another point.
    ///
    /// A straight `sqrt` of the squared coordinate differences, no
    /// approximation. Returns exactly `0.0` for coinciding points, which the
    /// membership update relies on to detect the point-on-center case.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrt(dx * dx + dy * dy)
    }

    /// `true` if both coordinates are finite (no NaN, no infinities).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_pythagorean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_coinciding_points_is_exactly_zero() {
        let a = Point::new(1.283, -2.841);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_distance_axis_aligned() {
        let a = Point::new(2.0, 1.0);
        let b = Point::new(2.0, 3.5);
        assert!((a.distance(&b) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point::new(0.0, -1.5).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
        assert!(!Point::new(f64::NEG_INFINITY, f64::NAN).is_finite());
    }

    #[test]
    fn test_from_tuple() {
        let p: Point = (1.5, 2.5).into();
        assert_eq!(p, Point::new(1.5, 2.5));
    }
}
