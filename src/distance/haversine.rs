//! Great-circle distances between geographic points.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
///
/// # Examples
///
/// ```
/// use u_hike::distance::GeoPoint;
///
/// let p = GeoPoint::new(46.5, 7.9).unwrap();
/// assert_eq!(p.lat(), 46.5);
/// assert!(GeoPoint::new(91.0, 0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Creates a point.
    ///
    /// Returns `None` if either coordinate is non-finite or out of range.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Haversine distance to another point in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self, other)
    }
}

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Sum of haversine legs along an ordered sequence of points.
///
/// Zero for fewer than two points.
///
/// # Examples
///
/// ```
/// use u_hike::distance::{path_length_km, GeoPoint};
///
/// let a = GeoPoint::new(0.0, 0.0).unwrap();
/// let b = GeoPoint::new(0.0, 1.0).unwrap();
/// let there_and_back = path_length_km(&[a, b, a]);
/// assert!((there_and_back - 2.0 * a.distance_km(&b)).abs() < 1e-9);
/// ```
pub fn path_length_km(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| haversine_km(&w[0], &w[1])).sum()
}
