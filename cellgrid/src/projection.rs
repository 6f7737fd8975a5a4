//! Cube-face projection of the unit sphere.
//!
//! The sphere is projected onto the 6 faces of a circumscribed cube.
//! Each face carries (u, v) coordinates in [-1, 1]; an area-equalizing
//! quadratic warp maps (u, v) to (s, t) in [0, 1], which quantize to
//! 30-bit integer (i, j) cell coordinates.

use crate::point::Point;

/// Number of cube faces.
pub const NUM_FACES: u8 = 6;

/// Finest grid level.
pub const MAX_LEVEL: u8 = 30;

/// Number of leaf-cell columns along one face edge (2^30).
pub(crate) const MAX_SIZE: i64 = 1 << MAX_LEVEL;

/// Face whose axis direction is closest to `p`.
pub(crate) fn face(p: &Point) -> u8 {
    let f = p.largest_abs_component() as u8;
    let component = match f {
        0 => p.x,
        1 => p.y,
        _ => p.z,
    };
    if component < 0.0 {
        f + 3
    } else {
        f
    }
}

/// (u, v) coordinates of `p` on `face`, which must be the face returned
/// by [`face`] so the divisor is the largest component.
pub(crate) fn valid_face_xyz_to_uv(face: u8, p: &Point) -> (f64, f64) {
    match face {
        0 => (p.y / p.x, p.z / p.x),
        1 => (-p.x / p.y, p.z / p.y),
        2 => (-p.x / p.z, -p.y / p.z),
        3 => (p.z / p.x, p.y / p.x),
        4 => (p.z / p.y, -p.x / p.y),
        _ => (-p.y / p.z, -p.x / p.z),
    }
}

/// Direction vector (not normalized) of face-local (u, v).
pub(crate) fn face_uv_to_xyz(face: u8, u: f64, v: f64) -> Point {
    match face {
        0 => Point::new(1.0, u, v),
        1 => Point::new(-u, 1.0, v),
        2 => Point::new(-u, -v, 1.0),
        3 => Point::new(-1.0, -v, -u),
        4 => Point::new(v, -1.0, -u),
        _ => Point::new(v, u, -1.0),
    }
}

/// Quadratic area-equalizing warp, u in [-1, 1] to s in [0, 1].
pub(crate) fn uv_to_st(u: f64) -> f64 {
    if u >= 0.0 {
        0.5 * (1.0 + 3.0 * u).sqrt()
    } else {
        1.0 - 0.5 * (1.0 - 3.0 * u).sqrt()
    }
}

/// Inverse of [`uv_to_st`].
pub(crate) fn st_to_uv(s: f64) -> f64 {
    if s >= 0.5 {
        (1.0 / 3.0) * (4.0 * s * s - 1.0)
    } else {
        (1.0 / 3.0) * (1.0 - 4.0 * (1.0 - s) * (1.0 - s))
    }
}

/// Quantize s in [0, 1] to a leaf-cell coordinate in [0, 2^30).
pub(crate) fn st_to_ij(s: f64) -> i64 {
    ((MAX_SIZE as f64 * s).floor() as i64).clamp(0, MAX_SIZE - 1)
}
