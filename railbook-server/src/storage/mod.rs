//! Storage shim.
//!
//! A uniform find/insert/count interface over interchangeable backends.
//! Candidates are ranked and tried once at startup; the winner is
//! exposed as a single resolved [`Storage`] handle that gets injected
//! into the catalog, ledger, and auth layers. Business logic never
//! branches on which backend is live.

mod filter;
mod json_file;
mod memory;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

pub use filter::Filter;
pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;

/// Storage-level errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("collection {collection} is corrupt: {message}")]
    Corrupt { collection: String, message: String },

    #[error("failed to encode document: {0}")]
    Encode(serde_json::Error),
}

/// A storage backend: synchronous, per-call durable, no transactions.
pub trait Backend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// First document matching the filter, in storage order.
    fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>, StorageError>;

    /// All documents matching the filter, in storage order.
    fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StorageError>;

    /// Append a document, assigning an `_id` when absent. Returns the id.
    fn insert_one(&self, collection: &str, doc: Value) -> Result<String, StorageError>;

    /// Number of documents matching the filter.
    fn count(&self, collection: &str, filter: &Filter) -> Result<usize, StorageError>;
}

/// A backend candidate for startup selection, in preference order.
#[derive(Debug, Clone)]
pub enum BackendCandidate {
    /// JSON flat files under the given data directory.
    JsonDir(std::path::PathBuf),

    /// In-process memory store; always succeeds.
    Memory,
}

/// The resolved storage handle.
///
/// Wraps whichever backend won at startup and layers the typed
/// conversions on top, so callers deserialize documents into domain
/// structs exactly once at this boundary.
pub struct Storage {
    backend: Box<dyn Backend>,
}

impl Storage {
    /// Try the candidates in order and return a handle to the first one
    /// that opens. Falls back to the memory backend when every candidate
    /// fails, so this always succeeds; each outcome is logged.
    pub fn open(candidates: &[BackendCandidate]) -> Storage {
        for candidate in candidates {
            match candidate {
                BackendCandidate::JsonDir(dir) => match JsonFileBackend::open(dir) {
                    Ok(backend) => {
                        info!(backend = backend.name(), dir = %dir.display(), "storage backend selected");
                        return Storage {
                            backend: Box::new(backend),
                        };
                    }
                    Err(e) => {
                        warn!(dir = %dir.display(), error = %e, "json-file backend unavailable, trying next candidate");
                    }
                },
                BackendCandidate::Memory => {
                    info!(backend = "memory", "storage backend selected");
                    return Storage {
                        backend: Box::new(MemoryBackend::new()),
                    };
                }
            }
        }

        warn!("no storage candidate succeeded, falling back to memory backend");
        Storage {
            backend: Box::new(MemoryBackend::new()),
        }
    }

    /// A memory-backed handle, for tests.
    pub fn in_memory() -> Storage {
        Storage {
            backend: Box::new(MemoryBackend::new()),
        }
    }

    /// Name of the live backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// First raw document matching the filter.
    pub fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Value>, StorageError> {
        self.backend.find_one(collection, filter)
    }

    /// All raw documents matching the filter.
    pub fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StorageError> {
        self.backend.find_many(collection, filter)
    }

    /// Append a serializable record. Returns the assigned id.
    pub fn insert_one<T: Serialize>(
        &self,
        collection: &str,
        record: &T,
    ) -> Result<String, StorageError> {
        let doc = serde_json::to_value(record).map_err(StorageError::Encode)?;
        self.backend.insert_one(collection, doc)
    }

    /// Number of documents matching the filter.
    pub fn count(&self, collection: &str, filter: &Filter) -> Result<usize, StorageError> {
        self.backend.count(collection, filter)
    }

    /// First matching document, decoded into a domain type.
    ///
    /// Decode failures are data corruption: the document was written by
    /// this application and must match its schema.
    pub fn find_one_as<T: serde::de::DeserializeOwned>(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<T>, StorageError> {
        match self.backend.find_one(collection, filter)? {
            None => Ok(None),
            Some(doc) => decode(collection, doc).map(Some),
        }
    }

    /// All matching documents, decoded into a domain type.
    pub fn find_many_as<T: serde::de::DeserializeOwned>(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<T>, StorageError> {
        self.backend
            .find_many(collection, filter)?
            .into_iter()
            .map(|doc| decode(collection, doc))
            .collect()
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Decode a raw document into a typed record.
fn decode<T: serde::de::DeserializeOwned>(
    collection: &str,
    mut doc: Value,
) -> Result<T, StorageError> {
    // `_id` is backend bookkeeping, not part of any domain type.
    if let Some(obj) = doc.as_object_mut() {
        obj.remove("_id");
    }
    serde_json::from_value(doc).map_err(|e| StorageError::Corrupt {
        collection: collection.to_string(),
        message: e.to_string(),
    })
}

/// Ensure a document carries an `_id`, assigning a random one if absent.
fn with_id(mut doc: Value) -> Value {
    if let Some(obj) = doc.as_object_mut() {
        if !obj.contains_key("_id") {
            obj.insert("_id".to_string(), Value::String(json_file::generate_id()));
        }
    }
    doc
}
