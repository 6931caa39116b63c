use thiserror::Error;

/// Error types for nearbox operations
#[derive(Debug, Error)]
pub enum Error {
    /// The spatial query could not be executed
    #[error("spatial query failed: {0}")]
    Query(String),
    /// The database handle is closed or was never usable
    #[error("database connection unavailable: {0}")]
    Connection(String),
    /// The target collection does not exist
    #[error("collection not found: {0}")]
    CollectionNotFound(String),
    /// Lock acquisition failed
    #[error("failed to acquire lock")]
    Lock,
    /// A search request violated an input invariant
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
    /// Record serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// I/O error from the data ingestion path
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this failure came from the query path (as opposed to the
    /// request boundary).
    pub fn is_query_failure(&self) -> bool {
        matches!(
            self,
            Error::Query(_) | Error::Connection(_) | Error::CollectionNotFound(_) | Error::Lock
        )
    }
}

/// Result type alias for nearbox operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CollectionNotFound("clothes_box".to_string());
        assert_eq!(err.to_string(), "collection not found: clothes_box");

        let err = Error::Query("index rebuild failed".to_string());
        assert_eq!(err.to_string(), "spatial query failed: index rebuild failed");
    }

    #[test]
    fn test_query_failure_classification() {
        assert!(Error::Connection("closed".to_string()).is_query_failure());
        assert!(Error::Lock.is_query_failure());
        assert!(!Error::InvalidRequest("latitude out of range".to_string()).is_query_failure());
    }
}
