//! Spatial utilities for nearbox
//!
//! This module provides the geographic point type and the distance math
//! backing the proximity queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius in meters (WGS84 spherical approximation).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Meters covered by one degree of latitude (and of longitude at the equator).
const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * TO_RAD;

/// A geographic point representing a location on Earth's surface.
///
/// `Point` stores latitude and longitude in decimal degrees (WGS84) and
/// provides distance calculations used by the spatial index.
///
/// # Examples
///
/// ```rust
/// use nearbox::Point;
///
/// let city_hall = Point::new(37.263573, 127.028601);
/// let station = Point::new(37.266551, 127.000839);
/// let distance_m = city_hall.distance_to(&station);
/// assert!(distance_m > 2_000.0 && distance_m < 3_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Latitude in decimal degrees (-90.0 to +90.0)
    pub lat: f64,
    /// Longitude in decimal degrees (-180.0 to +180.0)
    pub lon: f64,
}

impl Point {
    /// Creates a new point from latitude and longitude coordinates.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a point from a stored `[longitude, latitude]` coordinate pair.
    ///
    /// Stored geometry keeps (longitude, latitude) order; this constructor is
    /// the one place that order is interpreted when reading records.
    pub fn from_lon_lat(coordinates: [f64; 2]) -> Self {
        Self {
            lat: coordinates[1],
            lon: coordinates[0],
        }
    }

    /// Whether both coordinates are finite and within valid WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Calculate the great-circle distance to another point in meters,
    /// using the Haversine formula.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let lat1 = self.lat * TO_RAD;
        let lat2 = other.lat * TO_RAD;
        let dlat = (other.lat - self.lat) * TO_RAD;
        let dlon = (other.lon - self.lon) * TO_RAD;

        let sin_half_dlat = (dlat * 0.5).sin();
        let sin_half_dlon = (dlon * 0.5).sin();

        let a =
            sin_half_dlat * sin_half_dlat + lat1.cos() * lat2.cos() * sin_half_dlon * sin_half_dlon;
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    /// Check if this point lies within `radius_meters` of `center`.
    pub fn within_distance(&self, center: &Point, radius_meters: f64) -> bool {
        self.distance_to(center) <= radius_meters
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// A latitude/longitude bounding box used as a coarse pre-filter for the
/// exact haversine check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Bounding box guaranteed to cover the circle of `radius_meters` around
    /// `center`.
    ///
    /// The longitude span widens by 1/cos(lat) away from the equator and is
    /// clamped to the full range near the poles, so the box over-covers
    /// rather than under-covers. Candidates outside the circle are discarded
    /// by the exact distance check afterwards.
    pub fn around(center: &Point, radius_meters: f64) -> Self {
        let dlat = radius_meters / METERS_PER_DEGREE;

        let cos_lat = (center.lat * TO_RAD).cos();
        let dlon = if cos_lat <= f64::EPSILON {
            180.0
        } else {
            (radius_meters / (METERS_PER_DEGREE * cos_lat)).min(180.0)
        };

        Self {
            min_lat: (center.lat - dlat).max(-90.0),
            min_lon: (center.lon - dlon).max(-180.0),
            max_lat: (center.lat + dlat).min(90.0),
            max_lon: (center.lon + dlon).min(180.0),
        }
    }

    /// Check if this bounding box contains the given point.
    pub fn contains(&self, point: &Point) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lon >= self.min_lon
            && point.lon <= self.max_lon
    }
}
