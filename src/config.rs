//! Environment-supplied configuration
//!
//! Every knob has a hardcoded fallback so the service starts with no
//! environment at all. A `.env` file is honored by the binary via `dotenvy`
//! before this is read.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_NAME: &str = "test";
pub const DEFAULT_COLLECTION: &str = "clothes_box";
pub const DEFAULT_SEARCH_DISTANCE_M: f64 = 1000.0;
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration, read once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database name (`DB_NAME`).
    pub db_name: String,
    /// Collection holding the location records (`DB_COLLECTION_CLOTH_BOX`).
    pub collection: String,
    /// Radius in meters applied when a request omits one (`SEARCH_DISTANCE`).
    pub default_radius_m: f64,
    /// Optional JSON records file ingested at startup (`DATA_FILE`).
    pub data_file: Option<PathBuf>,
    /// HTTP listen port (`PORT`).
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            db_name: env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string()),
            collection: env::var("DB_COLLECTION_CLOTH_BOX")
                .unwrap_or_else(|_| DEFAULT_COLLECTION.to_string()),
            default_radius_m: env::var("SEARCH_DISTANCE")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|r| r.is_finite() && *r >= 0.0)
                .unwrap_or(DEFAULT_SEARCH_DISTANCE_M),
            data_file: env::var("DATA_FILE").ok().map(PathBuf::from),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_name: DEFAULT_DB_NAME.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            default_radius_m: DEFAULT_SEARCH_DISTANCE_M,
            data_file: None,
            port: DEFAULT_PORT,
        }
    }
}
