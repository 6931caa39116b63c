//! R-tree spatial index over location records
//!
//! Entries are indexed by their stored `[longitude, latitude]` coordinate
//! pair. Queries run as a bounding-box envelope pre-filter followed by an
//! exact haversine distance check, returning matches nearest-first.

use crate::record::LocationRecord;
use crate::spatial::{BoundingBox, Point};
use rstar::{AABB, RTree, RTreeObject};

/// A location record wrapped for the R-tree.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRecord {
    pub record: LocationRecord,
    /// `[longitude, latitude]`, matching the stored convention.
    position: [f64; 2],
    /// Position in the source snapshot; breaks distance ties so collocated
    /// records come back in insertion order regardless of tree layout.
    ordinal: usize,
}

impl RTreeObject for IndexedRecord {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// An immutable spatial index built from a collection snapshot.
pub struct SpatialIndex {
    rtree: RTree<IndexedRecord>,
}

impl SpatialIndex {
    /// Bulk-load an index from a record snapshot.
    pub fn build(records: Vec<LocationRecord>) -> Self {
        let items = records
            .into_iter()
            .enumerate()
            .map(|(ordinal, record)| IndexedRecord {
                position: record.geometry.coordinates,
                record,
                ordinal,
            })
            .collect();
        Self {
            rtree: RTree::bulk_load(items),
        }
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    /// All records within `radius_meters` of `center`, paired with their
    /// distance in meters, nearest-first. Collocated records keep their
    /// insertion order relative to each other.
    ///
    /// The envelope passed to the R-tree is in (longitude, latitude) axis
    /// order, matching how entries were indexed. A radius of 0 matches only
    /// records stored exactly at the query point.
    pub fn within_radius(&self, center: &Point, radius_meters: f64) -> Vec<(LocationRecord, f64)> {
        let bbox = BoundingBox::around(center, radius_meters);
        let envelope = AABB::from_corners(
            [bbox.min_lon, bbox.min_lat],
            [bbox.max_lon, bbox.max_lat],
        );

        let mut hits: Vec<(&IndexedRecord, f64)> = self
            .rtree
            .locate_in_envelope_intersecting(&envelope)
            .filter_map(|item| {
                let distance = center.distance_to(&item.record.geometry.point());
                (distance <= radius_meters).then_some((item, distance))
            })
            .collect();

        // The tree hands back candidates in arbitrary order; the ordinal
        // tie-break keeps equal-distance records in insertion order.
        hits.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.ordinal.cmp(&b.0.ordinal))
        });
        hits.into_iter()
            .map(|(item, distance)| (item.record.clone(), distance))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PointGeometry;

    fn record(id: &str, lon: f64, lat: f64) -> LocationRecord {
        LocationRecord::new(id, format!("address {id}"), PointGeometry::new(lon, lat))
    }

    #[test]
    fn test_empty_index() {
        let index = SpatialIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index
            .within_radius(&Point::new(37.16, 127.11), 5000.0)
            .is_empty());
    }

    #[test]
    fn test_results_are_nearest_first() {
        let center = Point::new(37.162720658936784, 127.11264145768898);
        // Offsets in latitude only: distance is proportional to the offset
        let index = SpatialIndex::build(vec![
            record("far", 127.11264145768898, 37.162720658936784 + 0.02),
            record("near", 127.11264145768898, 37.162720658936784 + 0.005),
            record("mid", 127.11264145768898, 37.162720658936784 + 0.01),
        ]);

        let hits = index.within_radius(&center, 10_000.0);
        let ids: Vec<&str> = hits.iter().map(|(r, _)| r.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid", "far"]);
        assert!(hits[0].1 < hits[1].1 && hits[1].1 < hits[2].1);
    }

    #[test]
    fn test_radius_excludes_outliers() {
        let center = Point::new(37.16, 127.11);
        let index = SpatialIndex::build(vec![
            record("inside", 127.11, 37.165),  // ~556 m north
            record("outside", 127.11, 37.25), // ~10 km north
        ]);

        let hits = index.within_radius(&center, 1000.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.id, "inside");
        assert!(hits[0].1 <= 1000.0);
    }

    #[test]
    fn test_zero_radius_matches_only_collocated() {
        let center = Point::new(37.162720658936784, 127.11264145768898);
        let index = SpatialIndex::build(vec![
            record("exact_a", 127.11264145768898, 37.162720658936784),
            record("exact_b", 127.11264145768898, 37.162720658936784),
            record("near", 127.11265, 37.16273),
        ]);

        let hits = index.within_radius(&center, 0.0);
        assert_eq!(hits.len(), 2);
        // Collocated ties preserve index order
        assert_eq!(hits[0].0.id, "exact_a");
        assert_eq!(hits[1].0.id, "exact_b");
        assert_eq!(hits[0].1, 0.0);
    }

    #[test]
    fn test_distance_ties_keep_insertion_order() {
        let center = Point::new(37.162720658936784, 127.11264145768898);
        // Four records at the same point, ~550 m north of center. The tree
        // stores identical points in whatever layout it likes, so the query
        // must restore insertion order itself.
        let shared = (127.11264145768898, 37.162720658936784 + 0.005);
        let index = SpatialIndex::build(vec![
            record("1", shared.0, shared.1),
            record("2", shared.0, shared.1),
            record("3", shared.0, shared.1),
            record("4", shared.0, shared.1),
            record("closer", 127.11264145768898, 37.162720658936784 + 0.001),
        ]);

        let hits = index.within_radius(&center, 2000.0);
        let ids: Vec<&str> = hits.iter().map(|(r, _)| r.id.as_str()).collect();
        assert_eq!(ids, vec!["closer", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_query_crossing_both_axes() {
        // Offsets in longitude as well as latitude, so an accidental
        // coordinate swap in the envelope would be caught
        let center = Point::new(37.16, 127.11);
        let index = SpatialIndex::build(vec![
            record("east", 127.12, 37.16),
            record("west", 127.10, 37.16),
            record("elsewhere", 126.0, 36.0),
        ]);

        let hits = index.within_radius(&center, 2000.0);
        let mut ids: Vec<&str> = hits.iter().map(|(r, _)| r.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["east", "west"]);
    }
}
