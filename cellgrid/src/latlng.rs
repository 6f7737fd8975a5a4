//! Geographic coordinate pair in degrees.

use crate::point::Point;

/// A (latitude, longitude) pair in degrees.
///
/// Valid ranges are [-90, 90] for latitude and [-180, 180] for
/// longitude; construction does not enforce them (see
/// [`LatLng::is_valid`]), matching the permissive point-tagging
/// surface where out-of-range inputs simply project like any other.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    pub fn from_degrees(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    pub fn lat_degrees(&self) -> f64 {
        self.lat
    }

    pub fn lng_degrees(&self) -> f64 {
        self.lng
    }

    pub fn lat_radians(&self) -> f64 {
        self.lat.to_radians()
    }

    pub fn lng_radians(&self) -> f64 {
        self.lng.to_radians()
    }

    pub fn is_valid(&self) -> bool {
        self.lat.abs() <= 90.0 && self.lng.abs() <= 180.0
    }

    /// Unit-sphere point for this coordinate pair.
    pub fn to_point(&self) -> Point {
        let phi = self.lat_radians();
        let theta = self.lng_radians();
        let cos_phi = phi.cos();
        Point::new(theta.cos() * cos_phi, theta.sin() * cos_phi, phi.sin())
    }

    /// Coordinate pair under the given point (which need not be
    /// normalized).
    pub fn from_point(p: &Point) -> Self {
        let lat = p.z.atan2((p.x * p.x + p.y * p.y).sqrt()).to_degrees();
        let lng = p.y.atan2(p.x).to_degrees();
        LatLng { lat, lng }
    }
}
