//! Stateless query surface over the typed layer.
//!
//! Every function here takes and returns primitives or sequences of
//! primitives so callers can invoke them one row at a time from batch
//! engines. Malformed input degrades to `None` or a sentinel; the one
//! hard failure is a grammatical polygon ring that is geometrically
//! invalid, which surfaces as
//! [`SpatialError::GeometryValidation`](crate::SpatialError::GeometryValidation).

use crate::cap::Cap;
use crate::cellid::CellId;
use crate::cellunion::CellUnion;
use crate::coverer::RegionCoverer;
use crate::errors::SpatialResult;
use crate::latlng::LatLng;
use crate::polygon::Polygon;
use crate::projection::MAX_LEVEL;
use crate::wkt;

/// Earth's mean radius in meters, used for all angle/distance
/// conversions.
pub const EARTH_RADIUS_METERS: f64 = 6_371_010.0;

fn checked_level(level: i64) -> Option<u8> {
    if (0..=MAX_LEVEL as i64).contains(&level) {
        Some(level as u8)
    } else {
        log::debug!("level {} outside [0, {}]", level, MAX_LEVEL);
        None
    }
}

fn checked_token(token: &str) -> Option<CellId> {
    let id = CellId::from_token(token);
    if id.is_none() {
        None
    } else {
        Some(id)
    }
}

/// Token of the cell containing (`lat`, `lng`) at `level`, or `None`
/// when the level is out of range.
///
/// # Examples
///
/// ```
/// assert_eq!(
///     cellgrid::functions::cell_token(32.15091, 34.848075, 15),
///     Some("151d48164".to_string())
/// );
/// ```
pub fn cell_token(lat: f64, lng: f64, level: i64) -> Option<String> {
    let level = checked_level(level)?;
    let id = CellId::from_lat_lng(&LatLng::from_degrees(lat, lng));
    Some(id.parent_at(level).token())
}

/// Token of the leaf cell containing (`lat`, `lng`).
pub fn leaf_cell_token(lat: f64, lng: f64) -> String {
    CellId::from_lat_lng(&LatLng::from_degrees(lat, lng)).token()
}

/// Token of the parent one level up. Malformed tokens and face cells
/// both map to the sentinel token `"X"`.
pub fn parent_token(token: &str) -> String {
    let id = CellId::from_token(token);
    if !id.is_valid() || id.is_face() {
        return CellId::none().token();
    }
    match id.parent(id.level() - 1) {
        Ok(parent) => parent.token(),
        Err(_) => CellId::none().token(),
    }
}

/// Level encoded in `token`, or −1 for malformed tokens.
pub fn token_level(token: &str) -> i64 {
    let id = CellId::from_token(token);
    if id.is_none() {
        -1
    } else {
        id.level() as i64
    }
}

/// Great-circle distance in meters from the cell's center to
/// (`lat`, `lng`).
pub fn distance_meters(token: &str, lat: f64, lng: f64) -> Option<f64> {
    let id = checked_token(token)?;
    let target = LatLng::from_degrees(lat, lng).to_point();
    Some(id.to_point().angle(&target) * EARTH_RADIUS_METERS)
}

/// Center of the cell as (lat, lng) degrees.
pub fn centroid(token: &str) -> Option<(f64, f64)> {
    let id = checked_token(token)?;
    let ll = id.to_lat_lng();
    Some((ll.lat_degrees(), ll.lng_degrees()))
}

/// Tokens of the cells at `level` edge-adjacent to the cell's
/// footprint. The result is a set; order carries no meaning beyond
/// being ascending.
pub fn neighbor_tokens(token: &str, level: i64) -> Option<Vec<String>> {
    let level = checked_level(level)?;
    let id = checked_token(token)?;
    Some(id.neighbors(level).iter().map(CellId::token).collect())
}

/// Tokens of the 4 child cells, or `None` for leaf cells and
/// malformed tokens.
pub fn child_tokens(token: &str) -> Option<Vec<String>> {
    let id = checked_token(token)?;
    Some(id.children()?.iter().map(CellId::token).collect())
}

/// Tokens of the cells at `level` within `radius_meters` of the
/// cell's center, found by flood fill outward from the center cell.
pub fn radius_cover_tokens(token: &str, radius_meters: f64, level: i64) -> Option<Vec<String>> {
    let level = checked_level(level)?;
    let id = checked_token(token)?;
    let center = id.to_point();
    let cap = Cap::from_center_radius(center, radius_meters / EARTH_RADIUS_METERS);
    let cells = RegionCoverer::simple_covering(&cap, &center, level);
    Some(cells.iter().map(CellId::token).collect())
}

/// Parses `POLYGON((lon lat, ...))` text into a validated polygon.
/// Text that does not match the grammar yields the empty sentinel.
pub fn parse_wkt_polygon(text: &str) -> SpatialResult<Polygon> {
    wkt::parse_polygon(text)
}

/// Tokens of a covering of the polygon between `min_level` and
/// `max_level`, ascending. `Ok(None)` when the levels are out of
/// range or the text does not describe a polygon.
pub fn polygon_cover_tokens(
    text: &str,
    min_level: i64,
    max_level: i64,
) -> SpatialResult<Option<Vec<String>>> {
    let (Some(min_level), Some(max_level)) = (checked_level(min_level), checked_level(max_level))
    else {
        return Ok(None);
    };
    let Ok(coverer) = RegionCoverer::new(min_level, max_level) else {
        return Ok(None);
    };
    let polygon = wkt::parse_polygon(text)?;
    if polygon.is_empty() {
        return Ok(None);
    }
    let union = coverer.covering(&polygon);
    Ok(Some(union.cell_ids().iter().map(CellId::token).collect()))
}

/// Whether the cell lies within the polygon's covering at `level`.
/// `Ok(Some(false))` for the empty polygon, `Ok(None)` for an
/// out-of-range level or a malformed token.
pub fn within_polygon(token: &str, text: &str, level: i64) -> SpatialResult<Option<bool>> {
    let Some(level) = checked_level(level) else {
        return Ok(None);
    };
    let polygon = wkt::parse_polygon(text)?;
    if polygon.is_empty() {
        return Ok(Some(false));
    }
    let Some(id) = checked_token(token) else {
        return Ok(None);
    };
    let Ok(coverer) = RegionCoverer::new(level, level) else {
        return Ok(None);
    };
    Ok(Some(coverer.covering(&polygon).contains(&id)))
}

/// Whether the polygon's covering at `level` contains the cell; the
/// argument-swapped reading of [`within_polygon`], with the polygon
/// staying the container.
pub fn contains_polygon(text: &str, token: &str, level: i64) -> SpatialResult<Option<bool>> {
    within_polygon(token, text, level)
}

/// Whether the cell lies within the union of `cells`. Any malformed
/// token in the list poisons the call to `None`.
pub fn within_cells(token: &str, cells: &[String]) -> Option<bool> {
    let id = checked_token(token)?;
    let ids = cells
        .iter()
        .map(|t| checked_token(t))
        .collect::<Option<Vec<_>>>()?;
    Some(CellUnion::from_cell_ids(ids).contains(&id))
}

/// Whether the union of `cells` contains the cell; the argument-swapped
/// reading of [`within_cells`], with the list staying the container.
pub fn contains_cells(cells: &[String], token: &str) -> Option<bool> {
    within_cells(token, cells)
}

/// Whether cell `token` lies within cell `other`.
pub fn within_cell(token: &str, other: &str) -> Option<bool> {
    let id = checked_token(token)?;
    let outer = checked_token(other)?;
    Some(outer.contains(&id))
}

/// Whether cell `token` contains cell `other`; the argument-swapped
/// reading of [`within_cell`].
pub fn contains_cell(token: &str, other: &str) -> Option<bool> {
    within_cell(other, token)
}
