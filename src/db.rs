//! Embedded document store for nearbox
//!
//! A [`Database`] is a named handle over named collections of
//! [`LocationRecord`]s. One handle is created at process startup and shared
//! by cloning (the clone is a cheap `Arc` handle); it lives for the process
//! duration and is never re-created. Records arrive through the startup
//! ingestion path ([`Database::load_records`]); the search core only reads
//! them.

use crate::error::{Error, Result};
use crate::record::LocationRecord;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

/// Process-wide handle to the backing store.
#[derive(Clone)]
pub struct Database {
    inner: Arc<RwLock<DatabaseInner>>,
}

struct DatabaseInner {
    name: String,
    collections: HashMap<String, Arc<Collection>>,
    closed: bool,
}

impl Database {
    /// Open a named database.
    pub fn open(name: impl Into<String>) -> Self {
        let name = name.into();
        info!(db = %name, "database opened");
        Self {
            inner: Arc::new(RwLock::new(DatabaseInner {
                name,
                collections: HashMap::new(),
                closed: false,
            })),
        }
    }

    /// Name of this database.
    pub fn name(&self) -> Result<String> {
        Ok(self.read()?.name.clone())
    }

    /// Get or create a collection. Creating a collection that already exists
    /// is a no-op returning the existing handle.
    pub fn create_collection(&self, name: &str) -> Result<Arc<Collection>> {
        let mut inner = self.write()?;
        if inner.closed {
            return Err(Error::Connection(format!(
                "database {:?} is closed",
                inner.name
            )));
        }
        let collection = inner
            .collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Collection::new(name)));
        Ok(Arc::clone(collection))
    }

    /// Look up an existing collection.
    pub fn collection(&self, name: &str) -> Result<Arc<Collection>> {
        let inner = self.read()?;
        if inner.closed {
            return Err(Error::Connection(format!(
                "database {:?} is closed",
                inner.name
            )));
        }
        inner
            .collections
            .get(name)
            .cloned()
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))
    }

    /// Load a JSON array of location records from disk into a collection,
    /// returning the number of records ingested.
    pub fn load_records(&self, path: impl AsRef<Path>, collection_name: &str) -> Result<usize> {
        let raw = fs::read_to_string(path.as_ref())?;
        let records: Vec<LocationRecord> = serde_json::from_str(&raw)?;
        let count = records.len();

        let collection = self.create_collection(collection_name)?;
        collection.insert_many(records)?;

        info!(
            collection = collection_name,
            count, "loaded location records"
        );
        Ok(count)
    }

    /// Close the handle. Subsequent queries fail with a connection error.
    /// Provided for completeness; the search core never calls it.
    pub fn close(&self) -> Result<()> {
        let mut inner = self.write()?;
        if !inner.closed {
            inner.closed = true;
            info!(db = %inner.name, "database closed");
        }
        Ok(())
    }

    /// Whether this handle has been closed.
    pub fn is_closed(&self) -> Result<bool> {
        Ok(self.read()?.closed)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, DatabaseInner>> {
        self.inner.read().map_err(|_| Error::Lock)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, DatabaseInner>> {
        self.inner.write().map_err(|_| Error::Lock)
    }
}

/// A named collection of location records.
///
/// The generation counter increases on every mutation; the spatial index
/// uses it to detect staleness without scanning the records.
#[derive(Debug)]
pub struct Collection {
    name: String,
    inner: RwLock<CollectionInner>,
}

#[derive(Debug)]
struct CollectionInner {
    records: Vec<LocationRecord>,
    generation: u64,
}

impl Collection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            inner: RwLock::new(CollectionInner {
                records: Vec::new(),
                generation: 0,
            }),
        }
    }

    /// Name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append one record.
    pub fn insert(&self, record: LocationRecord) -> Result<()> {
        let mut inner = self.write()?;
        inner.records.push(record);
        inner.generation += 1;
        Ok(())
    }

    /// Append a batch of records as one generation step.
    pub fn insert_many(&self, records: impl IntoIterator<Item = LocationRecord>) -> Result<()> {
        let mut inner = self.write()?;
        inner.records.extend(records);
        inner.generation += 1;
        Ok(())
    }

    /// Snapshot of all records in insertion order.
    pub fn records(&self) -> Result<Vec<LocationRecord>> {
        Ok(self.read()?.records.clone())
    }

    /// Current generation; changes whenever the records change.
    pub fn generation(&self) -> Result<u64> {
        Ok(self.read()?.generation)
    }

    /// Number of records.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.records.len())
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.records.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CollectionInner>> {
        self.inner.read().map_err(|_| Error::Lock)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CollectionInner>> {
        self.inner.write().map_err(|_| Error::Lock)
    }
}
