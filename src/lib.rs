//! # nearbox - proximity search for clothing collection boxes
//!
//! nearbox answers one question: given a caller's coordinates and a search
//! radius, which registered collection points (clothing donation boxes) are
//! nearby? Records live in an embedded, R-tree indexed store; the service
//! layer projects them into a stable caller-facing shape.
//!
//! ## Features
//!
//! - **Spatial indexing**: R-tree over stored point geometry, built lazily
//!   and reused until the collection changes
//! - **Distance-bounded retrieval**: haversine-filtered radius queries,
//!   nearest-first
//! - **Explicit coordinate normalization**: stored `[longitude, latitude]`
//!   pairs are transposed to `{lat, lon}` output in exactly one tested step
//! - **Failures as values**: query and connection failures are returned, not
//!   thrown, all the way to the HTTP boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use nearbox::{Database, GeoStore, LocationRecord, PointGeometry};
//! use nearbox::{SearchRequest, SearchService};
//! use std::sync::Arc;
//!
//! # fn main() -> nearbox::Result<()> {
//! let db = Database::open("test");
//! let boxes = db.create_collection("clothes_box")?;
//! boxes.insert(LocationRecord::new(
//!     "box-1",
//!     "경기도 수원시 권선구 권선1동",
//!     PointGeometry::new(127.11264145768898, 37.162720658936784),
//! ))?;
//!
//! let store = Arc::new(GeoStore::new(db, "clothes_box"));
//! let service = SearchService::new(store, 1000.0);
//!
//! let request = SearchRequest::new(37.162720658936784, 127.11264145768898, Some(3000.0));
//! let results = service.search(&request)?;
//! assert_eq!(results[0].id, "box-1");
//! assert_eq!(results[0].coordinates.latitude, 37.162720658936784);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod index;
pub mod record;
pub mod service;
pub mod spatial;
pub mod store;

pub use config::Config;
pub use db::{Collection, Database};
pub use error::{Error, Result};
pub use index::SpatialIndex;
pub use record::{
    Coordinates, GeometryKind, LocationRecord, PointGeometry, SearchRequest, SearchResultItem,
};
pub use service::SearchService;
pub use spatial::{BoundingBox, Point};
pub use store::GeoStore;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
