//! JSON flat-file storage backend.
//!
//! Each collection lives in `<dir>/<collection>.json` as a JSON array of
//! documents. Inserts rewrite the whole file, so concurrent writers to
//! the same collection can race and lose updates; that is an accepted
//! limitation of this backend.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde_json::Value;

use super::filter::Filter;
use super::{Backend, StorageError};

/// Flat-file backend rooted at a data directory.
#[derive(Debug)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Open the backend, creating the data directory if needed.
    ///
    /// Fails when the directory cannot be created or is not writable,
    /// which lets the startup candidate list fall through to the next
    /// backend.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        // Probe writability up front rather than failing on first insert.
        let probe = dir.join(".write-probe");
        fs::write(&probe, b"ok")?;
        fs::remove_file(&probe)?;

        Ok(Self { dir })
    }

    /// Path of a collection file.
    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    /// Read a whole collection; a missing file is an empty collection.
    fn read_collection(&self, collection: &str) -> Result<Vec<Value>, StorageError> {
        let path = self.collection_path(collection);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt {
            collection: collection.to_string(),
            message: e.to_string(),
        })
    }

    /// Rewrite a whole collection file.
    fn write_collection(&self, collection: &str, docs: &[Value]) -> Result<(), StorageError> {
        let path = self.collection_path(collection);
        let bytes = serde_json::to_vec_pretty(docs).map_err(StorageError::Encode)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Where this backend keeps its files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Backend for JsonFileBackend {
    fn name(&self) -> &'static str {
        "json-file"
    }

    fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>, StorageError> {
        let docs = self.read_collection(collection)?;
        Ok(docs.into_iter().find(|doc| filter.matches(doc)))
    }

    fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StorageError> {
        let docs = self.read_collection(collection)?;
        Ok(docs.into_iter().filter(|doc| filter.matches(doc)).collect())
    }

    fn insert_one(&self, collection: &str, doc: Value) -> Result<String, StorageError> {
        let mut docs = self.read_collection(collection)?;
        let doc = super::with_id(doc);
        let id = doc
            .get("_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        docs.push(doc);
        self.write_collection(collection, &docs)?;
        Ok(id)
    }

    fn count(&self, collection: &str, filter: &Filter) -> Result<usize, StorageError> {
        let docs = self.read_collection(collection)?;
        Ok(docs.iter().filter(|doc| filter.matches(doc)).count())
    }
}

/// Generate a document id: a random 7-digit numeric string.
pub(super) fn generate_id() -> String {
    rand::thread_rng().gen_range(1_000_000..10_000_000u32).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_collection_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::open(tmp.path()).unwrap();

        assert_eq!(backend.find_many("bookings", &Filter::all()).unwrap(), Vec::<serde_json::Value>::new());
        assert_eq!(backend.count("bookings", &Filter::all()).unwrap(), 0);
        assert!(backend.find_one("bookings", &Filter::all()).unwrap().is_none());
    }

    #[test]
    fn insert_then_find() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::open(tmp.path()).unwrap();

        let id = backend
            .insert_one("stations", json!({"code": "NDLS", "name": "New Delhi"}))
            .unwrap();
        assert_eq!(id.len(), 7);

        let found = backend
            .find_one("stations", &Filter::eq("code", "NDLS"))
            .unwrap()
            .unwrap();
        assert_eq!(found["name"], "New Delhi");
        assert_eq!(found["_id"].as_str().unwrap(), id);
    }

    #[test]
    fn insert_is_durable_across_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let backend = JsonFileBackend::open(tmp.path()).unwrap();
            backend
                .insert_one("users", json!({"username": "asha"}))
                .unwrap();
        }

        let backend = JsonFileBackend::open(tmp.path()).unwrap();
        assert_eq!(backend.count("users", &Filter::all()).unwrap(), 1);
    }

    #[test]
    fn existing_id_is_preserved() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::open(tmp.path()).unwrap();

        let id = backend
            .insert_one("users", json!({"_id": "42", "username": "ravi"}))
            .unwrap();
        assert_eq!(id, "42");
    }

    #[test]
    fn corrupt_file_is_reported_not_swallowed() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::open(tmp.path()).unwrap();
        std::fs::write(tmp.path().join("trains.json"), b"not json").unwrap();

        let err = backend.find_many("trains", &Filter::all()).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn open_fails_on_unwritable_dir() {
        // A file in place of the directory makes create_dir_all fail.
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocked");
        std::fs::write(&blocker, b"file").unwrap();

        assert!(JsonFileBackend::open(&blocker).is_err());
    }
}
