//! 64-bit hierarchical cell identifier.
//!
//! A cell id packs a cube face (3 bits), a position along a
//! space-filling curve on that face (60 bits), and a trailing marker
//! bit whose position encodes the level: level 30 (leaf) sets bit 0,
//! each coarser level shifts the marker up two bits. Sorting ids
//! numerically sorts cells along the curve, and every descendant of a
//! cell falls inside the id range `[range_min, range_max]`, which is
//! what makes prefix containment a pair of unsigned comparisons.

use smallvec::SmallVec;

use crate::errors::{SpatialError, SpatialResult};
use crate::latlng::LatLng;
use crate::point::Point;
use crate::projection::{
    self, face_uv_to_xyz, st_to_ij, st_to_uv, uv_to_st, valid_face_xyz_to_uv, MAX_SIZE,
};

pub use crate::projection::{MAX_LEVEL, NUM_FACES};

/// Curve position lookup tables. The curve on each face is a Hilbert
/// curve; the traversal order within a 2x2 block depends on the
/// current orientation, tracked as a swap bit and an invert bit.
const SWAP_MASK: u8 = 0x01;

const POS_TO_IJ: [[u8; 4]; 4] = [
    [0, 1, 3, 2],
    [0, 2, 3, 1],
    [3, 2, 0, 1],
    [3, 1, 0, 2],
];

const IJ_TO_POS: [[u8; 4]; 4] = [
    [0, 1, 3, 2],
    [0, 3, 1, 2],
    [2, 3, 1, 0],
    [2, 1, 3, 0],
];

const POS_TO_ORIENTATION: [u8; 4] = [SWAP_MASK, 0, 0, SWAP_MASK | 0x02];

/// Marker-bit mask over all 30 even positions plus bit 60; a valid id
/// has its lowest set bit on one of these positions.
const VALID_LSB_MASK: u64 = 0x1555555555555555;

/// Identifier of a cell in the hierarchical spherical grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(u64);

impl CellId {
    /// Wraps a raw 64-bit value; no validity check.
    pub fn new(id: u64) -> Self {
        CellId(id)
    }

    /// The invalid zero id, used as the "no cell" sentinel.
    pub fn none() -> Self {
        CellId(0)
    }

    /// The level-0 cell covering an entire cube face.
    pub fn from_face(face: u8) -> Self {
        CellId(((face as u64) << 61) | (1 << 60))
    }

    /// Leaf cell containing the given coordinates.
    pub fn from_lat_lng(ll: &LatLng) -> Self {
        Self::from_point(&ll.to_point())
    }

    /// Leaf cell containing the given point (need not be normalized).
    pub fn from_point(p: &Point) -> Self {
        let face = projection::face(p);
        let (u, v) = valid_face_xyz_to_uv(face, p);
        let i = st_to_ij(uv_to_st(u));
        let j = st_to_ij(uv_to_st(v));
        Self::from_face_ij(face, i, j)
    }

    /// Leaf cell at face-local coordinates (i, j), both in [0, 2^30).
    pub(crate) fn from_face_ij(face: u8, i: i64, j: i64) -> Self {
        let mut bits = (face & SWAP_MASK) as usize;
        let mut pos: u64 = 0;
        for k in (0..MAX_LEVEL).rev() {
            let ij = ((((i >> k) & 1) << 1) | ((j >> k) & 1)) as usize;
            let p = IJ_TO_POS[bits][ij];
            pos = (pos << 2) | p as u64;
            bits ^= POS_TO_ORIENTATION[p as usize] as usize;
        }
        CellId(((((face as u64) << 60) | pos) << 1) | 1)
    }

    /// Like [`CellId::from_face_ij`] but (i, j) may lie just outside
    /// the face, in which case the coordinates wrap onto the adjacent
    /// face. The wrap goes through a linear (u, v) mapping in both
    /// directions, which is self-consistent and avoids re-warping.
    pub(crate) fn from_face_ij_wrap(face: u8, i: i64, j: i64) -> Self {
        let i = i.clamp(-1, MAX_SIZE);
        let j = j.clamp(-1, MAX_SIZE);
        let scale = 1.0 / MAX_SIZE as f64;
        let limit = 1.0 + f64::EPSILON;
        let u = (scale * (2 * (i - MAX_SIZE / 2) + 1) as f64).clamp(-limit, limit);
        let v = (scale * (2 * (j - MAX_SIZE / 2) + 1) as f64).clamp(-limit, limit);
        let p = face_uv_to_xyz(face, u, v);
        let new_face = projection::face(&p);
        let (u2, v2) = valid_face_xyz_to_uv(new_face, &p);
        Self::from_face_ij(new_face, st_to_ij(0.5 * (u2 + 1.0)), st_to_ij(0.5 * (v2 + 1.0)))
    }

    fn from_face_ij_same(face: u8, i: i64, j: i64, same_face: bool) -> Self {
        if same_face {
            Self::from_face_ij(face, i, j)
        } else {
            Self::from_face_ij_wrap(face, i, j)
        }
    }

    /// Parses a token: 1 to 16 hex digits, case-insensitive, trailing
    /// zero nibbles implied. Malformed text yields the invalid id.
    pub fn from_token(token: &str) -> Self {
        if token.is_empty() || token.len() > 16 || token == "X" || token == "x" {
            return Self::none();
        }
        match u64::from_str_radix(token, 16) {
            Ok(value) => CellId(value << (4 * (16 - token.len() as u32))),
            Err(_) => {
                log::debug!("malformed cell token {:?}", token);
                Self::none()
            }
        }
    }

    /// Hex token with trailing zero nibbles stripped; `"X"` for the
    /// invalid zero id (which has no nonzero nibble to print).
    pub fn token(&self) -> String {
        if self.0 == 0 {
            return "X".to_string();
        }
        let hex = format!("{:016x}", self.0);
        hex.trim_end_matches('0').to_string()
    }

    pub fn id(&self) -> u64 {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    pub fn face(&self) -> u8 {
        (self.0 >> 61) as u8
    }

    /// True iff the face is in range and the marker bit sits on a
    /// level-aligned position.
    pub fn is_valid(&self) -> bool {
        self.face() < NUM_FACES && (self.lsb() & VALID_LSB_MASK) != 0
    }

    /// Level encoded by the marker bit. The id must be nonzero; it
    /// does not have to be structurally valid (a marker on an odd bit
    /// still reports the level its position implies).
    pub fn level(&self) -> u8 {
        debug_assert!(self.0 != 0);
        MAX_LEVEL - (self.0.trailing_zeros() >> 1) as u8
    }

    pub fn is_leaf(&self) -> bool {
        (self.0 & 1) != 0
    }

    pub fn is_face(&self) -> bool {
        (self.0 & ((1 << 60) - 1)) == 0
    }

    /// Lowest set bit (the marker bit for valid ids).
    pub(crate) fn lsb(&self) -> u64 {
        self.0 & self.0.wrapping_neg()
    }

    /// Smallest leaf id inside this cell.
    pub fn range_min(&self) -> CellId {
        CellId(self.0 - (self.lsb() - 1))
    }

    /// Largest leaf id inside this cell.
    pub fn range_max(&self) -> CellId {
        CellId(self.0 + (self.lsb() - 1))
    }

    /// True iff `other` is this cell or one of its descendants.
    pub fn contains(&self, other: &CellId) -> bool {
        *other >= self.range_min() && *other <= self.range_max()
    }

    /// Ancestor at `level`, which must not exceed the cell's level.
    pub fn parent(&self, level: u8) -> SpatialResult<CellId> {
        if level > MAX_LEVEL || level > self.level() {
            return Err(SpatialError::InvalidLevel(format!(
                "cannot take parent of level {} cell at level {}",
                self.level(),
                level
            )));
        }
        Ok(self.parent_at(level))
    }

    /// Ancestor at `level` without the range check; callers guarantee
    /// `level <= self.level()`.
    pub(crate) fn parent_at(&self, level: u8) -> CellId {
        let new_lsb = 1u64 << (2 * (MAX_LEVEL - level));
        CellId((self.0 & new_lsb.wrapping_neg()) | new_lsb)
    }

    /// The 4 children one level down, in ascending order; `None` for
    /// leaf cells.
    pub fn children(&self) -> Option<[CellId; 4]> {
        if self.is_leaf() {
            return None;
        }
        let lsb = self.lsb();
        let child_lsb = lsb >> 2;
        let begin = self.0 - lsb + child_lsb;
        Some([
            CellId(begin),
            CellId(begin + 2 * child_lsb),
            CellId(begin + 4 * child_lsb),
            CellId(begin + 6 * child_lsb),
        ])
    }

    /// Distinct cells at `level` edge-adjacent to this cell's
    /// footprint, in ascending order. At the cell's own level this is
    /// the usual 4-neighbor set; coarser levels can merge candidates
    /// to fewer, finer levels tile each edge with a strip of cells.
    /// The cell itself and its ancestors are never included.
    pub fn neighbors(&self, level: u8) -> Vec<CellId> {
        let own_level = self.level();
        let (face, i, j, _) = self.to_face_ij_orientation();
        let size = 1i64 << (MAX_LEVEL - own_level);
        let i_lo = i & -size;
        let j_lo = j & -size;
        let nbr_size = 1i64 << (MAX_LEVEL - level);

        let mut found: SmallVec<[CellId; 8]> = SmallVec::new();
        let mut k = 0i64;
        loop {
            let candidates = [
                (i_lo + k, j_lo - nbr_size, j_lo - nbr_size >= 0),
                (i_lo + k, j_lo + size, j_lo + size < MAX_SIZE),
                (i_lo - nbr_size, j_lo + k, i_lo - nbr_size >= 0),
                (i_lo + size, j_lo + k, i_lo + size < MAX_SIZE),
            ];
            for &(ci, cj, same_face) in &candidates {
                found.push(Self::from_face_ij_same(face, ci, cj, same_face).parent_at(level));
            }
            k += nbr_size;
            if k >= size {
                break;
            }
        }
        if level <= own_level {
            let ancestor = self.parent_at(level);
            found.retain(|c| *c != ancestor);
        }
        let mut result = found.into_vec();
        result.sort_unstable();
        result.dedup();
        result
    }

    /// Decodes face, (i, j) leaf coordinates of the cell's min corner
    /// leaf, and the curve orientation at the cell's level.
    pub(crate) fn to_face_ij_orientation(&self) -> (u8, i64, i64, u8) {
        let face = self.face();
        let mut bits = (face & SWAP_MASK) as usize;
        let mut i: i64 = 0;
        let mut j: i64 = 0;
        for k in (0..MAX_LEVEL).rev() {
            let pos = ((self.0 >> (1 + 2 * k)) & 3) as usize;
            let ij = POS_TO_IJ[bits][pos];
            i |= ((ij >> 1) as i64) << k;
            j |= ((ij & 1) as i64) << k;
            bits ^= POS_TO_ORIENTATION[pos] as usize;
        }
        (face, i, j, bits as u8)
    }

    /// Center of the cell as a direction vector (not normalized).
    pub(crate) fn to_point_raw(&self) -> Point {
        let (face, i, j, _) = self.to_face_ij_orientation();
        // The marker bit perturbs the decoded (i, j) parity; the delta
        // recenters si/ti on the cell midpoint at every level.
        let delta = if self.is_leaf() {
            1
        } else if ((i as u64 ^ (self.0 >> 2)) & 1) != 0 {
            2
        } else {
            0
        };
        let si = 2 * i + delta;
        let ti = 2 * j + delta;
        let scale = 0.5 / MAX_SIZE as f64;
        let u = st_to_uv(scale * si as f64);
        let v = st_to_uv(scale * ti as f64);
        face_uv_to_xyz(face, u, v)
    }

    /// Unit-length center of the cell.
    pub fn to_point(&self) -> Point {
        self.to_point_raw().normalized()
    }

    /// Center of the cell in degrees.
    pub fn to_lat_lng(&self) -> LatLng {
        LatLng::from_point(&self.to_point_raw())
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}
