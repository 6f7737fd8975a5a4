//! Three-dimensional point on (or near) the unit sphere.

/// A point in R^3, usually on the unit sphere.
///
/// Not every `Point` is normalized; cell-center computations work with
/// raw face coordinates and normalize only where an angle is taken.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Fixed reference point used for loop containment bookkeeping.
///
/// Point containment is tracked as "is the reference point inside",
/// updated by counting edge crossings between the reference point and
/// the query point. Any fixed point works as long as it is used
/// consistently.
pub(crate) const REFERENCE_POINT: Point = Point {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z }
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Point) -> Point {
        Point {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalized(&self) -> Point {
        let n = self.norm();
        Point {
            x: self.x / n,
            y: self.y / n,
            z: self.z / n,
        }
    }

    /// Central angle in radians between two unit-length points.
    pub fn angle(&self, other: &Point) -> f64 {
        self.dot(other).clamp(-1.0, 1.0).acos()
    }

    /// Index (0, 1, 2) of the component with the largest absolute value.
    pub(crate) fn largest_abs_component(&self) -> usize {
        let (x, y, z) = (self.x.abs(), self.y.abs(), self.z.abs());
        if x > y {
            if x > z {
                0
            } else {
                2
            }
        } else if y > z {
            1
        } else {
            2
        }
    }

    /// A unit-length point orthogonal to `self`.
    ///
    /// The offsets keep the result away from any coordinate axis so
    /// that downstream orientation tests never see a degenerate frame.
    pub(crate) fn ortho(&self) -> Point {
        let k = match self.largest_abs_component() {
            0 => 2,
            other => other - 1,
        };
        let temp = match k {
            0 => Point::new(1.0, 0.0053, 0.00457),
            1 => Point::new(0.012, 1.0, 0.00457),
            _ => Point::new(0.012, 0.0053, 1.0),
        };
        self.cross(&temp).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_cross_basics() {
        let x = Point::new(1.0, 0.0, 0.0);
        let y = Point::new(0.0, 1.0, 0.0);
        let z = Point::new(0.0, 0.0, 1.0);
        assert_eq!(x.dot(&y), 0.0);
        assert_eq!(x.cross(&y), z);
        assert_eq!(y.cross(&z), x);
        assert_eq!(z.cross(&x), y);
    }

    #[test]
    fn test_angle_between_axes_is_right() {
        let x = Point::new(1.0, 0.0, 0.0);
        let y = Point::new(0.0, 1.0, 0.0);
        assert!((x.angle(&y) - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
        assert_eq!(x.angle(&x), 0.0);
    }

    #[test]
    fn test_normalized_has_unit_length() {
        let p = Point::new(3.0, -4.0, 12.0).normalized();
        assert!((p.norm() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_largest_abs_component() {
        assert_eq!(Point::new(3.0, -2.0, 1.0).largest_abs_component(), 0);
        assert_eq!(Point::new(0.1, -2.0, 1.0).largest_abs_component(), 1);
        assert_eq!(Point::new(0.1, -2.0, 2.5).largest_abs_component(), 2);
    }

    #[test]
    fn test_ortho_is_orthogonal_and_unit() {
        for p in [
            Point::new(1.0, 0.2, -0.3).normalized(),
            Point::new(-0.1, 0.9, 0.4).normalized(),
            Point::new(0.0, 0.0, -1.0),
        ] {
            let o = p.ortho();
            assert!(p.dot(&o).abs() < 1e-14);
            assert!((o.norm() - 1.0).abs() < 1e-14);
        }
    }
}
