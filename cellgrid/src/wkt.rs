//! Restricted WKT polygon parsing.
//!
//! Only the single-ring form `POLYGON((lon lat, lon lat, ...))` is
//! supported: case-insensitive keyword, whitespace-tolerant, no holes,
//! no multipolygon, no Z/M coordinates, plain decimal numbers only.
//! Text that does not match the grammar degrades silently to the
//! empty-polygon sentinel; text that matches but describes an invalid
//! ring fails with a validation error.

use crate::errors::SpatialResult;
use crate::polygon::Polygon;

/// Parses polygon text into a validated [`Polygon`].
///
/// Returns the empty sentinel for any grammar mismatch and
/// [`crate::SpatialError::GeometryValidation`] for a grammatical ring
/// that is geometrically unusable.
pub fn parse_polygon(text: &str) -> SpatialResult<Polygon> {
    match parse_ring(text) {
        Some(ring) => Polygon::from_ring(&ring),
        None => {
            log::debug!("text does not match the POLYGON((...)) grammar");
            Ok(Polygon::empty())
        }
    }
}

/// Extracts the vertex ring as (lat, lng) degree pairs, or `None` on
/// any grammar deviation. Input pair order is (lon, lat).
pub(crate) fn parse_ring(text: &str) -> Option<Vec<(f64, f64)>> {
    let trimmed = text.trim();
    if trimmed.len() < 7 || !trimmed.is_char_boundary(7) {
        return None;
    }
    let (keyword, rest) = trimmed.split_at(7);
    if !keyword.eq_ignore_ascii_case("POLYGON") {
        return None;
    }
    let rest = rest.trim_start().strip_prefix('(')?;
    let rest = rest.trim_start().strip_prefix('(')?;
    let rest = rest.trim_end().strip_suffix(')')?;
    let body = rest.trim_end().strip_suffix(')')?;
    if body.is_empty()
        || !body
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_whitespace() || matches!(c, '.' | ',' | '-'))
    {
        return None;
    }

    let mut ring = Vec::new();
    for pair in body.split(',') {
        let mut numbers = pair.split_whitespace();
        let lng: f64 = numbers.next()?.parse().ok()?;
        let lat: f64 = numbers.next()?.parse().ok()?;
        if numbers.next().is_some() {
            return None;
        }
        ring.push((lat, lng));
    }
    Some(ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ring_parses() {
        let ring = parse_ring("POLYGON((30 10, 40 40, 20 40, 30 10))").unwrap();
        assert_eq!(
            ring,
            vec![(10.0, 30.0), (40.0, 40.0), (40.0, 20.0), (10.0, 30.0)]
        );
    }

    #[test]
    fn test_keyword_case_and_whitespace_tolerated() {
        let text = "  polygon  ( ( 30 10 ,\t40 40 ,\n20 40 , 30 10 ) )  ";
        let ring = parse_ring(text).unwrap();
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_negative_coordinates() {
        let ring = parse_ring("POLYGON((-30.5 -10.25, -40 40, 20 -40))").unwrap();
        assert_eq!(ring[0], (-10.25, -30.5));
    }

    #[test]
    fn test_grammar_mismatches_yield_none() {
        for text in [
            "",
            "POLYGON",
            "POLYGON(())",
            "POLYGON(30 10, 40 40)",
            "POLYGON((30 10, 40 40)",
            "POLYGON((30 10 5, 40 40 5))",
            "POLYGON((30, 40))",
            "POLYGON((1e3 10, 40 40))",
            "POLYGON((abc def))",
            "LINESTRING((30 10, 40 40))",
            "POLYGON((30 10),(40 40))",
            "not even close",
        ] {
            assert!(parse_ring(text).is_none(), "{:?}", text);
        }
    }

    #[test]
    fn test_parse_polygon_sentinel_vs_error() {
        assert!(parse_polygon("POLYGON(())").unwrap().is_empty());
        assert!(parse_polygon("garbage").unwrap().is_empty());
        // Grammatical but invalid: two distinct vertices.
        assert!(parse_polygon("POLYGON((30 10, 40 40, 30 10))").is_err());
        // Grammatical and valid.
        let poly = parse_polygon("POLYGON((30 10, 40 40, 20 40, 30 10))").unwrap();
        assert!(!poly.is_empty());
    }
}
