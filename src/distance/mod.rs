//! Geographic distances.
//!
//! Provides haversine distances between waypoints and the length of a
//! waypoint chain.

mod haversine;

pub use haversine::{haversine_km, path_length_km, GeoPoint, EARTH_RADIUS_KM};
