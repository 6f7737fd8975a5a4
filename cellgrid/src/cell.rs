//! Decoded cell geometry.

use crate::cellid::{CellId, MAX_LEVEL};
use crate::point::Point;
use crate::polygon::Loop;
use crate::projection::{face_uv_to_xyz, st_to_uv, MAX_SIZE};

/// A cell id decoded into face-local geometry: exact (u, v) bounds and
/// corner vertices. Used by region tests during covering.
#[derive(Debug, Clone)]
pub struct Cell {
    id: CellId,
    face: u8,
    level: u8,
    u: [f64; 2],
    v: [f64; 2],
}

impl Cell {
    pub fn new(id: CellId) -> Self {
        let (face, i, j, _) = id.to_face_ij_orientation();
        let level = id.level();
        let size = 1i64 << (MAX_LEVEL - level);
        let i_lo = i & -size;
        let j_lo = j & -size;
        let scale = 1.0 / MAX_SIZE as f64;
        Cell {
            id,
            face,
            level,
            u: [
                st_to_uv(scale * i_lo as f64),
                st_to_uv(scale * (i_lo + size) as f64),
            ],
            v: [
                st_to_uv(scale * j_lo as f64),
                st_to_uv(scale * (j_lo + size) as f64),
            ],
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Unit-length center point.
    pub fn center(&self) -> Point {
        self.id.to_point()
    }

    /// Corner vertex `k` in [0, 4), in counter-clockwise order around
    /// the cell as seen from outside the sphere.
    pub fn vertex(&self, k: usize) -> Point {
        let u = self.u[(k >> 1) ^ (k & 1)];
        let v = self.v[k >> 1];
        face_uv_to_xyz(self.face, u, v).normalized()
    }

    /// Boundary ring of the cell.
    pub fn boundary(&self) -> Loop {
        Loop::new((0..4).map(|k| self.vertex(k)).collect())
    }
}
