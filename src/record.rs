//! Data model for nearbox
//!
//! Stored location records keep GeoJSON-style point geometry in
//! (longitude, latitude) order; the caller-facing result shape reports
//! (latitude, longitude). The transposition between the two happens in
//! exactly one place: [`SearchResultItem::from_record`].

use crate::error::{Error, Result};
use crate::spatial::Point;
use serde::{Deserialize, Serialize};

/// Geometry kind discriminant. Only point geometry is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
}

/// GeoJSON-style point geometry as stored on a location record.
///
/// `coordinates` is `[longitude, latitude]` — the geospatial-index
/// convention of the backing store. This order is authoritative; nothing
/// reorders it silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: GeometryKind::Point,
            coordinates: [longitude, latitude],
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    /// The geometry as a [`Point`] (lat/lon struct form).
    pub fn point(&self) -> Point {
        Point::from_lon_lat(self.coordinates)
    }
}

/// A stored collection point (clothing donation box).
///
/// Records are created and maintained by external ingestion; this crate only
/// reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub address: String,
    #[serde(rename = "location")]
    pub geometry: PointGeometry,
}

impl LocationRecord {
    pub fn new(id: impl Into<String>, address: impl Into<String>, geometry: PointGeometry) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            geometry,
        }
    }
}

/// A proximity search request. `radius_meters` of `None` means "use the
/// configured default radius"; the service applies that default on every
/// entry path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: Option<f64>,
}

impl SearchRequest {
    pub fn new(latitude: f64, longitude: f64, radius_meters: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            radius_meters,
        }
    }

    /// Validate the request invariants at the boundary, before it reaches
    /// the core: finite coordinates within WGS84 ranges, non-negative finite
    /// radius.
    pub fn validate(&self) -> Result<()> {
        if !Point::new(self.latitude, self.longitude).is_valid() {
            return Err(Error::InvalidRequest(format!(
                "coordinates out of range: lat {}, lon {}",
                self.latitude, self.longitude
            )));
        }
        if let Some(radius) = self.radius_meters {
            if !radius.is_finite() || radius < 0.0 {
                return Err(Error::InvalidRequest(format!(
                    "radius must be a non-negative number of meters, got {radius}"
                )));
            }
        }
        Ok(())
    }
}

/// Output coordinates in (latitude, longitude) order — the inverse of the
/// stored order. Wire names are `lat`/`lon`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

/// One entry of the caller-facing search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: String,
    pub address: String,
    pub coordinates: Coordinates,
}

impl SearchResultItem {
    /// Project a raw stored record into the public result shape.
    ///
    /// `id` and `address` are copied verbatim. The coordinate pair is
    /// transposed here, deliberately and exactly once: stored
    /// `coordinates[0]` (longitude) becomes `coordinates.longitude`, stored
    /// `coordinates[1]` (latitude) becomes `coordinates.latitude`.
    pub fn from_record(record: LocationRecord) -> Self {
        let [longitude, latitude] = record.geometry.coordinates;
        Self {
            id: record.id,
            address: record.address,
            coordinates: Coordinates {
                latitude,
                longitude,
            },
        }
    }
}
