//! In-process memory storage backend.
//!
//! The last-resort candidate: always available, nothing survives a
//! restart. Useful for tests and for running without a writable data
//! directory.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::filter::Filter;
use super::{Backend, StorageError};

/// Memory-only backend holding each collection as a plain `Vec`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>, StorageError> {
        let guard = self.collections.read().expect("storage lock poisoned");
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)).cloned()))
    }

    fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StorageError> {
        let guard = self.collections.read().expect("storage lock poisoned");
        Ok(guard
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn insert_one(&self, collection: &str, doc: Value) -> Result<String, StorageError> {
        let doc = super::with_id(doc);
        let id = doc
            .get("_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mut guard = self.collections.write().expect("storage lock poisoned");
        guard.entry(collection.to_string()).or_default().push(doc);
        Ok(id)
    }

    fn count(&self, collection: &str, filter: &Filter) -> Result<usize, StorageError> {
        let guard = self.collections.read().expect("storage lock poisoned");
        Ok(guard
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).count())
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_backend_finds_nothing() {
        let backend = MemoryBackend::new();
        assert!(backend.find_one("users", &Filter::all()).unwrap().is_none());
        assert_eq!(backend.count("users", &Filter::all()).unwrap(), 0);
    }

    #[test]
    fn insert_preserves_order() {
        let backend = MemoryBackend::new();
        backend.insert_one("trains", json!({"number": "12951"})).unwrap();
        backend.insert_one("trains", json!({"number": "12953"})).unwrap();

        let all = backend.find_many("trains", &Filter::all()).unwrap();
        assert_eq!(all[0]["number"], "12951");
        assert_eq!(all[1]["number"], "12953");
    }

    #[test]
    fn filtered_count() {
        let backend = MemoryBackend::new();
        backend
            .insert_one("bookings", json!({"username": "asha"}))
            .unwrap();
        backend
            .insert_one("bookings", json!({"username": "ravi"}))
            .unwrap();
        backend
            .insert_one("bookings", json!({"username": "asha"}))
            .unwrap();

        let count = backend
            .count("bookings", &Filter::eq("username", "asha"))
            .unwrap();
        assert_eq!(count, 2);
    }
}
