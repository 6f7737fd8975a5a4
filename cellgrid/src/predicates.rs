//! Robust orientation predicate.
//!
//! `robust_sign(a, b, c)` reports whether the triangle a, b, c winds
//! counter-clockwise (+1), clockwise (-1), or is degenerate (0) when
//! viewed from outside the sphere. A fast determinant with an error
//! threshold handles almost every call; near-zero determinants fall
//! back to compensated double-double arithmetic so that the sign is
//! decided by the actual value, not by rounding noise.

use crate::point::Point;

/// Upper bound on the rounding error of the fast determinant for
/// unit-length inputs.
const MAX_DET_ERROR: f64 = 1.6e-15;

/// Determinants whose double-double value is below this magnitude are
/// treated as exact zeros. The compensated computation carries roughly
/// 1e-31 of residual error for unit-length inputs, so the band only
/// absorbs true degeneracies (collinear or coincident vertices).
const DET_ZERO_BAND: f64 = 1e-28;

/// Orientation of the ordered triple (a, b, c).
pub fn robust_sign(a: &Point, b: &Point, c: &Point) -> i32 {
    robust_sign_with_cross(a, b, c, &a.cross(b))
}

/// Orientation with the precomputed cross product of a and b, so edge
/// chains can reuse it across many calls.
pub(crate) fn robust_sign_with_cross(a: &Point, b: &Point, c: &Point, a_cross_b: &Point) -> i32 {
    let det = a_cross_b.dot(c);
    if det > MAX_DET_ERROR {
        return 1;
    }
    if det < -MAX_DET_ERROR {
        return -1;
    }
    if a == b || b == c || c == a {
        return 0;
    }
    stable_sign(a, b, c)
}

/// Double-double evaluation of the determinant a . (b x c).
fn stable_sign(a: &Point, b: &Point, c: &Point) -> i32 {
    let minor_x = TwoFloat::product(b.y, c.z).sub(TwoFloat::product(b.z, c.y));
    let minor_y = TwoFloat::product(b.z, c.x).sub(TwoFloat::product(b.x, c.z));
    let minor_z = TwoFloat::product(b.x, c.y).sub(TwoFloat::product(b.y, c.x));
    let det = minor_x
        .mul_f64(a.x)
        .add(minor_y.mul_f64(a.y))
        .add(minor_z.mul_f64(a.z));
    if det.hi > DET_ZERO_BAND {
        1
    } else if det.hi < -DET_ZERO_BAND {
        -1
    } else {
        0
    }
}

/// Unevaluated sum of two floats with |lo| <= ulp(hi) / 2.
#[derive(Debug, Clone, Copy)]
struct TwoFloat {
    hi: f64,
    lo: f64,
}

impl TwoFloat {
    /// Exact product of two floats (relies on fused multiply-add).
    fn product(a: f64, b: f64) -> Self {
        let hi = a * b;
        let lo = a.mul_add(b, -hi);
        TwoFloat { hi, lo }
    }

    fn add(self, other: TwoFloat) -> Self {
        let (s, e) = two_sum(self.hi, other.hi);
        quick_two_sum(s, e + self.lo + other.lo)
    }

    fn sub(self, other: TwoFloat) -> Self {
        self.add(TwoFloat {
            hi: -other.hi,
            lo: -other.lo,
        })
    }

    fn mul_f64(self, f: f64) -> Self {
        let p = TwoFloat::product(self.hi, f);
        quick_two_sum(p.hi, p.lo + self.lo * f)
    }
}

/// Error-free sum of two floats, no magnitude precondition.
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bv = s - a;
    let av = s - bv;
    (s, (a - av) + (b - bv))
}

/// Renormalization step; assumes |a| >= |b| or a == 0.
fn quick_two_sum(a: f64, b: f64) -> TwoFloat {
    let hi = a + b;
    let lo = b - (hi - a);
    TwoFloat { hi, lo }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_orientations() {
        let x = Point::new(1.0, 0.0, 0.0);
        let y = Point::new(0.0, 1.0, 0.0);
        let z = Point::new(0.0, 0.0, 1.0);
        assert_eq!(robust_sign(&x, &y, &z), 1);
        assert_eq!(robust_sign(&y, &x, &z), -1);
        assert_eq!(robust_sign(&z, &x, &y), 1);
    }

    #[test]
    fn test_coincident_points_are_degenerate() {
        let x = Point::new(1.0, 0.0, 0.0);
        let y = Point::new(0.0, 1.0, 0.0);
        assert_eq!(robust_sign(&x, &x, &y), 0);
        assert_eq!(robust_sign(&x, &y, &y), 0);
        assert_eq!(robust_sign(&y, &x, &y), 0);
    }

    #[test]
    fn test_collinear_distinct_points_are_degenerate() {
        // Three distinct points on the equator share the plane z = 0,
        // so the exact determinant is zero.
        let a = Point::new(1.0, 0.0, 0.0);
        let b = Point::new(0.0, 1.0, 0.0);
        let c = Point::new(-1.0, 0.0, 0.0);
        assert_eq!(robust_sign(&a, &b, &c), 0);
    }

    #[test]
    fn test_sign_antisymmetry() {
        let a = Point::new(0.7, 0.3, 0.648).normalized();
        let b = Point::new(0.69, 0.31, 0.655).normalized();
        let c = Point::new(0.71, 0.305, 0.64).normalized();
        let s = robust_sign(&a, &b, &c);
        assert_ne!(s, 0);
        assert_eq!(robust_sign(&b, &a, &c), -s);
        assert_eq!(robust_sign(&a, &c, &b), -s);
    }

    #[test]
    fn test_cyclic_invariance() {
        let a = Point::new(0.1, 0.2, 0.97).normalized();
        let b = Point::new(0.12, 0.19, 0.97).normalized();
        let c = Point::new(0.11, 0.21, 0.97).normalized();
        let s = robust_sign(&a, &b, &c);
        assert_eq!(robust_sign(&b, &c, &a), s);
        assert_eq!(robust_sign(&c, &a, &b), s);
    }

    #[test]
    fn test_tiny_determinant_resolved_by_fallback() {
        // Two points a hair apart and a third far away: the fast
        // determinant is inside the error threshold, the fallback must
        // still produce consistent opposite signs for swapped inputs.
        let a = Point::new(1.0, 1e-16, 0.0);
        let b = Point::new(1.0, 0.0, 1e-16);
        let c = Point::new(0.0, 1.0, 0.0);
        let s = robust_sign(&a, &b, &c);
        assert_eq!(robust_sign(&b, &a, &c), -s);
    }

    #[test]
    fn test_two_float_product_is_exact() {
        let p = TwoFloat::product(1.0 + f64::EPSILON, 1.0 + f64::EPSILON);
        // (1 + e)^2 = 1 + 2e + e^2; the e^2 term survives in lo.
        assert_eq!(p.hi, 1.0 + 2.0 * f64::EPSILON);
        assert_eq!(p.lo, f64::EPSILON * f64::EPSILON);
    }
}
