//! Region covering.
//!
//! Approximates a region with a set of cells bounded by a minimum and
//! maximum level. The general covering recurses from the 6 face cells
//! and normalizes its output; the seeded covering flood-fills at a
//! single level from a known-interior starting point.

use crate::cell::Cell;
use crate::cellid::{CellId, MAX_LEVEL, NUM_FACES};
use crate::cellunion::CellUnion;
use crate::errors::{SpatialError, SpatialResult};
use crate::point::Point;

/// A region on the sphere that can be tested against cells.
pub trait Region {
    /// True if the region fully contains the cell.
    fn contains_cell(&self, cell: &Cell) -> bool;

    /// True if the region may intersect the cell; false only when the
    /// cell is certainly disjoint.
    fn may_intersect_cell(&self, cell: &Cell) -> bool;
}

/// Produces cell coverings of a region within a level range.
#[derive(Debug, Clone, Copy)]
pub struct RegionCoverer {
    min_level: u8,
    max_level: u8,
}

impl RegionCoverer {
    /// Coverer for cells between `min_level` and `max_level`, both in
    /// [0, 30] with `min_level <= max_level`.
    pub fn new(min_level: u8, max_level: u8) -> SpatialResult<Self> {
        if min_level > MAX_LEVEL || max_level > MAX_LEVEL || min_level > max_level {
            return Err(SpatialError::InvalidLevel(format!(
                "covering level range [{}, {}] outside [0, {}]",
                min_level, max_level, MAX_LEVEL
            )));
        }
        Ok(RegionCoverer {
            min_level,
            max_level,
        })
    }

    /// Covers `region` with cells, recursing from the 6 face cells.
    ///
    /// A cell is emitted when it is fully contained (at or past
    /// `min_level`) or when the recursion reaches `max_level` while
    /// the cell still intersects the boundary. The result is
    /// normalized, so merged parents can sit above `min_level`.
    pub fn covering<R: Region>(&self, region: &R) -> CellUnion {
        let mut ids = Vec::new();
        for face in 0..NUM_FACES {
            self.cover_cell(region, &Cell::new(CellId::from_face(face)), &mut ids);
        }
        CellUnion::from_cell_ids(ids)
    }

    fn cover_cell<R: Region>(&self, region: &R, cell: &Cell, ids: &mut Vec<CellId>) {
        if !region.may_intersect_cell(cell) {
            return;
        }
        if cell.level() >= self.min_level && region.contains_cell(cell) {
            ids.push(cell.id());
            return;
        }
        if cell.level() >= self.max_level {
            ids.push(cell.id());
            return;
        }
        // Levels below 30 always have children.
        if let Some(children) = cell.id().children() {
            for child in children {
                self.cover_cell(region, &Cell::new(child), ids);
            }
        }
    }

    /// Single-level covering by flood fill from the cell containing
    /// `start`, following edge neighbors while the region test keeps
    /// succeeding. Returns cells in ascending order.
    pub fn simple_covering<R: Region>(region: &R, start: &Point, level: u8) -> Vec<CellId> {
        let seed = CellId::from_point(start).parent_at(level);
        let mut visited = vec![seed];
        let mut frontier = vec![seed];
        let mut result = Vec::new();
        while let Some(id) = frontier.pop() {
            if !region.may_intersect_cell(&Cell::new(id)) {
                continue;
            }
            result.push(id);
            for neighbor in id.neighbors(level) {
                if !visited.contains(&neighbor) {
                    visited.push(neighbor);
                    frontier.push(neighbor);
                }
            }
        }
        result.sort_unstable();
        result
    }
}
