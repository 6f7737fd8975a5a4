//! Spherical polygon: a single simple closed ring.
//!
//! A [`Loop`] is an ordered ring of unit-sphere points whose interior
//! lies on the left of each directed edge. Point containment counts
//! edge crossings from a fixed reference point; the loop records
//! whether that reference point starts inside, and each query toggles
//! the state once per boundary crossing.
//!
//! A [`Polygon`] holds zero or one loop. Zero loops is the canonical
//! "no geometry" sentinel produced by malformed text; one loop is a
//! validated, orientation-normalized ring ready for covering.

use crate::cell::Cell;
use crate::coverer::Region;
use crate::edge::{ordered_ccw, EdgeCrosser};
use crate::errors::{SpatialError, SpatialResult};
use crate::latlng::LatLng;
use crate::point::{Point, REFERENCE_POINT};

/// A simple closed ring of vertices on the unit sphere.
#[derive(Debug, Clone)]
pub struct Loop {
    vertices: Vec<Point>,
    reference_inside: bool,
}

impl Loop {
    /// Builds a loop from at least 3 vertices. The vertex order
    /// defines the interior (left of each directed edge); no
    /// orientation normalization happens here.
    pub fn new(vertices: Vec<Point>) -> Self {
        assert!(vertices.len() >= 3, "a loop needs at least 3 vertices");
        let mut ring = Loop {
            vertices,
            reference_inside: false,
        };
        // Decide whether the reference point starts inside: v1 is
        // inside iff the wedge at v1 opens toward it, and the crossing
        // count from the reference point must agree.
        let v1_inside = ordered_ccw(
            &ring.vertices[1].ortho(),
            &ring.vertices[0],
            &ring.vertices[2],
            &ring.vertices[1],
        );
        if v1_inside != ring.contains_point(&ring.vertices[1]) {
            ring.reference_inside = true;
        }
        ring
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, i: usize) -> &Point {
        &self.vertices[i]
    }

    /// True if `p` is inside the loop, by crossing parity from the
    /// reference point.
    pub fn contains_point(&self, p: &Point) -> bool {
        let n = self.vertices.len();
        let mut inside = self.reference_inside;
        let mut crosser = EdgeCrosser::new(&REFERENCE_POINT, p, &self.vertices[n - 1]);
        for vertex in &self.vertices {
            inside ^= crosser.edge_or_vertex_crossing(vertex);
        }
        inside
    }

    /// Signed area of the enclosed region, positive when the vertex
    /// order is counter-clockwise viewed from outside (interior
    /// smaller than a hemisphere).
    pub fn signed_area(&self) -> f64 {
        let mut sum = 0.0;
        let v0 = &self.vertices[0];
        for window in self.vertices[1..].windows(2) {
            let (b, c) = (&window[0], &window[1]);
            // Per-triangle spherical excess of the fan (v0, b, c).
            sum += 2.0 * v0
                .dot(&b.cross(c))
                .atan2(1.0 + v0.dot(b) + b.dot(c) + c.dot(v0));
        }
        sum
    }

    /// The same ring with reversed vertex order (complemented
    /// interior).
    pub fn reversed(&self) -> Loop {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Loop::new(vertices)
    }

    /// True if any two non-adjacent edges properly cross.
    pub fn has_self_intersection(&self) -> bool {
        let n = self.vertices.len();
        for i in 0..n {
            let a = &self.vertices[i];
            let b = &self.vertices[(i + 1) % n];
            let mut crosser = EdgeCrosser::new(a, b, &self.vertices[n - 1]);
            for j in 0..n {
                let edge = (j + n - 1) % n;
                let crossing = crosser.robust_crossing(&self.vertices[j]);
                let adjacent =
                    edge == i || edge == (i + 1) % n || edge == (i + n - 1) % n;
                if crossing > 0 && !adjacent {
                    return true;
                }
            }
        }
        false
    }

    /// True if some edge of `self` properly crosses an edge of
    /// `other`.
    fn boundary_crosses(&self, other: &Loop) -> bool {
        let n = self.vertices.len();
        let m = other.vertices.len();
        for i in 0..n {
            let a = &self.vertices[(i + n - 1) % n];
            let b = &self.vertices[i];
            let mut crosser = EdgeCrosser::new(a, b, &other.vertices[m - 1]);
            for vertex in &other.vertices {
                if crosser.robust_crossing(vertex) > 0 {
                    return true;
                }
            }
        }
        false
    }

    /// True if `other` lies entirely inside `self`.
    pub fn contains_loop(&self, other: &Loop) -> bool {
        self.contains_point(&other.vertices[0]) && !self.boundary_crosses(other)
    }

    /// True if the two loops share any region or boundary crossing.
    pub fn intersects_loop(&self, other: &Loop) -> bool {
        if self.boundary_crosses(other) {
            return true;
        }
        self.contains_point(&other.vertices[0]) || other.contains_point(&self.vertices[0])
    }
}

/// A polygon region with zero loops (empty sentinel) or one validated
/// ring.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    loops: Vec<Loop>,
}

impl Polygon {
    /// The empty-polygon sentinel.
    pub fn empty() -> Self {
        Polygon { loops: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    /// Validates a ring of (lat, lng) degree pairs and builds the
    /// polygon.
    ///
    /// The closing duplicate vertex, if present, is dropped first.
    /// Unrecoverable rings fail with
    /// [`SpatialError::GeometryValidation`]: fewer than 3 distinct
    /// vertices, equal consecutive vertices, out-of-range coordinates,
    /// an edge spanning more than 180 degrees of longitude, or a ring
    /// enclosing a pole. A boundary that crosses itself is reported
    /// with a warning and kept; containment then follows crossing
    /// parity, which stays deterministic for the sliver rings that
    /// coordinate rounding produces in practice.
    pub fn from_ring(ring: &[(f64, f64)]) -> SpatialResult<Polygon> {
        let mut ring = ring.to_vec();
        if ring.len() >= 2 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(SpatialError::GeometryValidation(format!(
                "polygon ring has {} distinct vertices, need at least 3",
                ring.len()
            )));
        }
        for &(lat, lng) in &ring {
            if !LatLng::from_degrees(lat, lng).is_valid() {
                return Err(SpatialError::GeometryValidation(format!(
                    "vertex ({}, {}) outside the valid coordinate range",
                    lat, lng
                )));
            }
        }
        let n = ring.len();
        for k in 0..n {
            let a = ring[k];
            let b = ring[(k + 1) % n];
            if a == b {
                return Err(SpatialError::GeometryValidation(format!(
                    "equal consecutive vertices at index {}",
                    k
                )));
            }
            if (a.1 - b.1).abs() > 180.0 {
                return Err(SpatialError::GeometryValidation(format!(
                    "edge from longitude {} to {} crosses the anti-meridian",
                    a.1, b.1
                )));
            }
        }

        let points: Vec<Point> = ring
            .iter()
            .map(|&(lat, lng)| LatLng::from_degrees(lat, lng).to_point())
            .collect();
        let mut ring = Loop::new(points);
        if ring.signed_area() < 0.0 {
            ring = ring.reversed();
        }
        let north = Point::new(0.0, 0.0, 1.0);
        let south = Point::new(0.0, 0.0, -1.0);
        if ring.contains_point(&north) || ring.contains_point(&south) {
            return Err(SpatialError::GeometryValidation(
                "polygon ring encloses a pole".to_string(),
            ));
        }
        if ring.has_self_intersection() {
            log::warn!("polygon boundary crosses itself; containment follows crossing parity");
        }
        Ok(Polygon { loops: vec![ring] })
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        self.loops.iter().any(|l| l.contains_point(p))
    }
}

impl Region for Polygon {
    fn contains_cell(&self, cell: &Cell) -> bool {
        match self.loops.first() {
            Some(ring) => ring.contains_loop(&cell.boundary()),
            None => false,
        }
    }

    fn may_intersect_cell(&self, cell: &Cell) -> bool {
        match self.loops.first() {
            Some(ring) => ring.intersects_loop(&cell.boundary()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lat_lo: f64, lat_hi: f64, lng_lo: f64, lng_hi: f64) -> Vec<(f64, f64)> {
        vec![
            (lat_lo, lng_lo),
            (lat_lo, lng_hi),
            (lat_hi, lng_hi),
            (lat_hi, lng_lo),
        ]
    }

    fn pt(lat: f64, lng: f64) -> Point {
        LatLng::from_degrees(lat, lng).to_point()
    }

    #[test]
    fn test_square_contains_center_not_outside() {
        let poly = Polygon::from_ring(&square(10.0, 20.0, 30.0, 40.0)).unwrap();
        assert!(poly.contains_point(&pt(15.0, 35.0)));
        assert!(!poly.contains_point(&pt(25.0, 35.0)));
        assert!(!poly.contains_point(&pt(15.0, 45.0)));
        assert!(!poly.contains_point(&pt(-15.0, 35.0)));
    }

    #[test]
    fn test_winding_is_normalized() {
        // The same square in both vertex orders encloses the same
        // region after normalization.
        let mut reversed = square(10.0, 20.0, 30.0, 40.0);
        reversed.reverse();
        let a = Polygon::from_ring(&square(10.0, 20.0, 30.0, 40.0)).unwrap();
        let b = Polygon::from_ring(&reversed).unwrap();
        for p in [pt(15.0, 35.0), pt(25.0, 35.0), pt(0.0, 0.0)] {
            assert_eq!(a.contains_point(&p), b.contains_point(&p));
        }
    }

    #[test]
    fn test_closing_duplicate_is_dropped() {
        let mut ring = square(10.0, 20.0, 30.0, 40.0);
        ring.push(ring[0]);
        let poly = Polygon::from_ring(&ring).unwrap();
        assert_eq!(poly.loops()[0].num_vertices(), 4);
    }

    #[test]
    fn test_too_few_vertices_rejected() {
        let err = Polygon::from_ring(&[(0.0, 0.0), (1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, SpatialError::GeometryValidation(_)));
        // A "triangle" whose closing duplicate collapses it to 2.
        let err = Polygon::from_ring(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, SpatialError::GeometryValidation(_)));
    }

    #[test]
    fn test_consecutive_duplicate_rejected() {
        let err =
            Polygon::from_ring(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (0.0, 2.0)]).unwrap_err();
        assert!(matches!(err, SpatialError::GeometryValidation(_)));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let err =
            Polygon::from_ring(&[(0.0, 0.0), (95.0, 1.0), (1.0, 2.0)]).unwrap_err();
        assert!(matches!(err, SpatialError::GeometryValidation(_)));
    }

    #[test]
    fn test_anti_meridian_edge_rejected() {
        let err = Polygon::from_ring(&[(0.0, -179.0), (0.0, 179.0), (1.0, 0.0)]).unwrap_err();
        assert!(matches!(err, SpatialError::GeometryValidation(_)));
    }

    #[test]
    fn test_pole_circling_ring_rejected() {
        // A ring circling the north pole at latitude 80 necessarily
        // crosses the anti-meridian on its way around.
        let ring: Vec<(f64, f64)> =
            (0..8).map(|k| (80.0, -170.0 + 45.0 * k as f64)).collect();
        let err = Polygon::from_ring(&ring).unwrap_err();
        assert!(matches!(err, SpatialError::GeometryValidation(_)));
    }

    #[test]
    fn test_self_intersection_detected() {
        // Bowtie: edges (0-1) and (2-3) cross.
        let bowtie = vec![(0.0, 0.0), (2.0, 2.0), (0.0, 2.0), (2.0, 0.0)];
        let points: Vec<Point> = bowtie
            .iter()
            .map(|&(lat, lng)| pt(lat, lng))
            .collect();
        assert!(Loop::new(points).has_self_intersection());

        let clean: Vec<Point> = square(10.0, 20.0, 30.0, 40.0)
            .iter()
            .map(|&(lat, lng)| pt(lat, lng))
            .collect();
        assert!(!Loop::new(clean).has_self_intersection());
    }

    #[test]
    fn test_loop_relations() {
        let outer = Polygon::from_ring(&square(5.0, 35.0, 5.0, 35.0)).unwrap();
        let inner = Polygon::from_ring(&square(10.0, 20.0, 10.0, 20.0)).unwrap();
        let disjoint = Polygon::from_ring(&square(40.0, 50.0, 40.0, 50.0)).unwrap();
        let outer = &outer.loops()[0];
        let inner = &inner.loops()[0];
        let disjoint = &disjoint.loops()[0];
        assert!(outer.contains_loop(inner));
        assert!(!inner.contains_loop(outer));
        assert!(outer.intersects_loop(inner));
        assert!(!outer.intersects_loop(disjoint));
        assert!(!outer.contains_loop(disjoint));
    }

    #[test]
    fn test_signed_area_sign_tracks_orientation() {
        let ring: Vec<Point> = square(10.0, 20.0, 30.0, 40.0)
            .iter()
            .map(|&(lat, lng)| pt(lat, lng))
            .collect();
        let ccw = Loop::new(ring);
        let area = ccw.signed_area();
        assert!(area > 0.0);
        assert!((ccw.reversed().signed_area() + area).abs() < 1e-12);
    }

    #[test]
    fn test_empty_polygon_sentinel() {
        let poly = Polygon::empty();
        assert!(poly.is_empty());
        assert!(!poly.contains_point(&pt(0.0, 0.0)));
    }
}
