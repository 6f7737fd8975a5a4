//! Edge crossing tests on the sphere.
//!
//! [`EdgeCrosser`] answers whether a fixed edge AB crosses a chain of
//! query edges, reusing intermediate orientation results between
//! consecutive chain edges. Crossings that pass exactly through a
//! shared vertex are resolved by [`vertex_crossing`], which breaks the
//! tie consistently so that crossing parity sums work for point
//! containment.

use crate::point::Point;
use crate::predicates::{robust_sign, robust_sign_with_cross};

/// True if the edge from `a` to `b`, the edge from `b` to `c`, and the
/// edge from `c` back to `a` turn consistently counter-clockwise
/// around `o`. Degenerate (zero-orientation) steps count as
/// counter-clockwise, so the relation stays total for touching edges.
pub(crate) fn ordered_ccw(a: &Point, b: &Point, c: &Point, o: &Point) -> bool {
    let mut ccw_count = 0;
    if robust_sign(b, o, a) >= 0 {
        ccw_count += 1;
    }
    if robust_sign(c, o, b) >= 0 {
        ccw_count += 1;
    }
    if robust_sign(a, o, c) > 0 {
        ccw_count += 1;
    }
    ccw_count >= 2
}

/// Tie-break for edges AB and CD that share at least one endpoint.
///
/// Exactly one of `vertex_crossing(a, b, c, d)` and
/// `vertex_crossing(c, d, a, b)` is true for edges that share one
/// vertex, so summing it over a closed chain keeps parity correct.
pub(crate) fn vertex_crossing(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
    if a == b || c == d {
        return false;
    }
    if a == d {
        return ordered_ccw(&a.ortho(), c, b, a);
    }
    if b == c {
        return ordered_ccw(&b.ortho(), d, a, b);
    }
    if a == c {
        return ordered_ccw(&a.ortho(), d, b, a);
    }
    if b == d {
        return ordered_ccw(&b.ortho(), c, a, b);
    }
    false
}

/// Crossing tester for a fixed edge AB against a chain of edges.
///
/// Feed the chain one vertex at a time; each call tests the edge from
/// the previous vertex to the new one.
pub(crate) struct EdgeCrosser {
    a: Point,
    b: Point,
    a_cross_b: Point,
    c: Point,
    /// Orientation of the triangle ACB, negated: -sign(a, b, c).
    acb: i32,
}

impl EdgeCrosser {
    pub fn new(a: &Point, b: &Point, c: &Point) -> Self {
        let a_cross_b = a.cross(b);
        let acb = -robust_sign_with_cross(a, b, c, &a_cross_b);
        EdgeCrosser {
            a: *a,
            b: *b,
            a_cross_b,
            c: *c,
            acb,
        }
    }

    /// +1 if AB crosses the open edge CD, -1 if they do not cross, 0
    /// if a shared vertex or degeneracy makes the question ambiguous
    /// (resolve with [`vertex_crossing`]).
    pub fn robust_crossing(&mut self, d: &Point) -> i32 {
        let bda = robust_sign_with_cross(&self.a, &self.b, d, &self.a_cross_b);
        let result = if bda == -self.acb && bda != 0 {
            // d is on the opposite side of AB from c, so CD cannot
            // cross AB more than the triage already ruled out.
            -1
        } else if bda == 0 || self.acb == 0 {
            0
        } else {
            let c_cross_d = self.c.cross(d);
            let cbd = -robust_sign_with_cross(&self.c, d, &self.b, &c_cross_d);
            if cbd != self.acb {
                -1
            } else {
                let dac = robust_sign_with_cross(&self.c, d, &self.a, &c_cross_d);
                if dac == self.acb {
                    1
                } else {
                    -1
                }
            }
        };
        self.c = *d;
        self.acb = -bda;
        result
    }

    /// True if AB crosses CD, counting a shared-vertex touch according
    /// to [`vertex_crossing`]. Summing this over a closed chain gives
    /// containment parity.
    pub fn edge_or_vertex_crossing(&mut self, d: &Point) -> bool {
        let c_prev = self.c;
        match self.robust_crossing(d) {
            x if x < 0 => false,
            x if x > 0 => true,
            _ => vertex_crossing(&self.a, &self.b, &c_prev, d),
        }
    }
}
