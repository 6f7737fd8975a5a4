//! Spherical cap (circular region).

use crate::cell::Cell;
use crate::coverer::Region;
use crate::point::Point;

/// A circular region on the sphere: a unit-length center direction and
/// an angular radius in radians. Caps back the radius-based covering
/// queries.
#[derive(Debug, Clone, Copy)]
pub struct Cap {
    center: Point,
    radius: f64,
}

impl Cap {
    /// Cap from a unit-length center and an angular radius in radians.
    pub fn from_center_radius(center: Point, radius: f64) -> Self {
        Cap { center, radius }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        self.center.angle(p) <= self.radius
    }
}

impl Region for Cap {
    fn contains_cell(&self, cell: &Cell) -> bool {
        (0..4).all(|k| self.contains_point(&cell.vertex(k)))
    }

    /// Center-distance test: the cell counts as intersecting when its
    /// center point lies within the cap radius.
    fn may_intersect_cell(&self, cell: &Cell) -> bool {
        self.contains_point(&cell.center())
    }
}
