//! Geo store: distance-bounded retrieval over one collection
//!
//! [`GeoStore`] owns the spatial index lifecycle for a single collection of
//! location records and translates a (latitude, longitude, radius) query into
//! an index query. The index is built lazily on the first query and reused
//! until the collection changes; re-issuing the build is a no-op, not an
//! error.

use crate::db::Database;
use crate::error::{Error, Result};
use crate::index::SpatialIndex;
use crate::record::LocationRecord;
use crate::spatial::Point;
use std::sync::{Arc, RwLock};
use tracing::info;

struct CachedIndex {
    index: Arc<SpatialIndex>,
    generation: u64,
}

/// Distance-bounded access to a collection of location records.
pub struct GeoStore {
    db: Database,
    collection_name: String,
    index: RwLock<Option<CachedIndex>>,
}

impl GeoStore {
    /// Create a store over `collection_name` in `db`. No index is built yet;
    /// that happens on the first query.
    pub fn new(db: Database, collection_name: impl Into<String>) -> Self {
        let collection_name = collection_name.into();
        info!(collection = %collection_name, "geo store created");
        Self {
            db,
            collection_name,
            index: RwLock::new(None),
        }
    }

    /// Name of the collection this store queries.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// All records within `radius_meters` of the given coordinates,
    /// nearest-first.
    ///
    /// The coordinate pair handed to the index is in (longitude, latitude)
    /// order, matching the stored convention. Out-of-range or non-finite
    /// inputs yield no matches rather than crashing the query. An empty
    /// result is `Ok`, not an error; underlying failures (closed handle,
    /// missing collection) come back as `Err` values.
    pub fn find_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> Result<Vec<LocationRecord>> {
        let index = self.ensure_index()?;

        let center = Point::new(latitude, longitude);
        if !center.is_valid() || !radius_meters.is_finite() || radius_meters < 0.0 {
            return Ok(Vec::new());
        }

        let hits = index.within_radius(&center, radius_meters);
        Ok(hits.into_iter().map(|(record, _)| record).collect())
    }

    /// Ensure a spatial index exists over the collection and return it.
    ///
    /// Idempotent: an index that is already current is returned as-is; a
    /// stale one (the collection generation moved) is rebuilt from a fresh
    /// snapshot.
    pub fn ensure_index(&self) -> Result<Arc<SpatialIndex>> {
        let collection = self.db.collection(&self.collection_name)?;
        let generation = collection.generation()?;

        {
            let guard = self.index.read().map_err(|_| Error::Lock)?;
            if let Some(cached) = guard.as_ref() {
                if cached.generation == generation {
                    return Ok(Arc::clone(&cached.index));
                }
            }
        }

        let mut guard = self.index.write().map_err(|_| Error::Lock)?;
        // Another caller may have rebuilt while we waited for the write lock
        if let Some(cached) = guard.as_ref() {
            if cached.generation == generation {
                return Ok(Arc::clone(&cached.index));
            }
        }

        let records = collection.records()?;
        let index = Arc::new(SpatialIndex::build(records));
        info!(
            collection = %self.collection_name,
            records = index.len(),
            "spatial index created"
        );
        *guard = Some(CachedIndex {
            index: Arc::clone(&index),
            generation,
        });
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PointGeometry;

    fn record(id: &str, lon: f64, lat: f64) -> LocationRecord {
        LocationRecord::new(id, format!("address {id}"), PointGeometry::new(lon, lat))
    }

    fn store_with_records(records: Vec<LocationRecord>) -> GeoStore {
        let db = Database::open("test");
        let collection = db.create_collection("clothes_box").unwrap();
        collection.insert_many(records).unwrap();
        GeoStore::new(db, "clothes_box")
    }

    #[test]
    fn test_find_near_empty_collection_is_ok() {
        let store = store_with_records(Vec::new());
        let result = store.find_near(37.16, 127.11, 5000.0).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_find_near_missing_collection_is_error() {
        let db = Database::open("test");
        let store = GeoStore::new(db, "clothes_box");
        assert!(matches!(
            store.find_near(37.16, 127.11, 1000.0).unwrap_err(),
            Error::CollectionNotFound(_)
        ));
    }

    #[test]
    fn test_find_near_closed_database_is_error() {
        let db = Database::open("test");
        db.create_collection("clothes_box").unwrap();
        let store = GeoStore::new(db.clone(), "clothes_box");
        db.close().unwrap();

        assert!(matches!(
            store.find_near(37.16, 127.11, 1000.0).unwrap_err(),
            Error::Connection(_)
        ));
    }

    #[test]
    fn test_find_near_out_of_range_inputs_match_nothing() {
        let store = store_with_records(vec![record("1", 127.11, 37.16)]);
        assert!(store.find_near(91.0, 127.11, 5000.0).unwrap().is_empty());
        assert!(store.find_near(37.16, 200.0, 5000.0).unwrap().is_empty());
        assert!(store.find_near(f64::NAN, 127.11, 5000.0).unwrap().is_empty());
        assert!(store.find_near(37.16, 127.11, -5.0).unwrap().is_empty());
    }

    #[test]
    fn test_index_reused_until_collection_changes() {
        let store = store_with_records(vec![record("1", 127.11, 37.16)]);

        let first = store.ensure_index().unwrap();
        let second = store.ensure_index().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // A mutation bumps the generation; the next query sees a fresh index
        store
            .db
            .collection("clothes_box")
            .unwrap()
            .insert(record("2", 127.12, 37.17))
            .unwrap();
        let third = store.ensure_index().unwrap();
        assert!(!Arc::ptr_eq(&second, &third));
        assert_eq!(third.len(), 2);
    }

    #[test]
    fn test_find_near_returns_records_nearest_first() {
        let store = store_with_records(vec![
            record("far", 127.11264145768898, 37.162720658936784 + 0.02),
            record("near", 127.11264145768898, 37.162720658936784 + 0.005),
        ]);

        let results = store
            .find_near(37.162720658936784, 127.11264145768898, 10_000.0)
            .unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "far"]);
    }
}
