//! Proximity search service
//!
//! Orchestration layer between the boundary and the geo store: applies the
//! configured default radius, delegates to [`GeoStore::find_near`], and
//! projects raw records into the caller-facing result shape. Failures are
//! values; nothing is thrown across this boundary.

use crate::error::Result;
use crate::record::{SearchRequest, SearchResultItem};
use crate::store::GeoStore;
use std::sync::Arc;
use tracing::{error, info};

/// The sole public operation surface of the search core.
pub struct SearchService {
    store: Arc<GeoStore>,
    default_radius_m: f64,
}

impl SearchService {
    pub fn new(store: Arc<GeoStore>, default_radius_m: f64) -> Self {
        Self {
            store,
            default_radius_m,
        }
    }

    /// The radius applied when a request omits one.
    pub fn default_radius_m(&self) -> f64 {
        self.default_radius_m
    }

    /// Execute a proximity search.
    ///
    /// Every call performs a live query; identical requests are not
    /// memoized. Result items keep the store's nearest-first order with no
    /// further filtering, deduplication or re-ranking. A store failure is
    /// surfaced unchanged; zero matches is a success.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResultItem>> {
        let radius = request.radius_meters.unwrap_or(self.default_radius_m);
        info!(
            lat = request.latitude,
            lon = request.longitude,
            radius, "searching collection points"
        );

        let records = self
            .store
            .find_near(request.latitude, request.longitude, radius)
            .inspect_err(|err| error!(%err, "proximity query failed"))?;

        Ok(records.into_iter().map(SearchResultItem::from_record).collect())
    }
}
