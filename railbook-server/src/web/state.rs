//! Application state for the web layer.

use std::sync::Arc;

use crate::auth::SessionStore;
use crate::booking::Ledger;
use crate::catalog::Catalog;
use crate::storage::Storage;

/// Shared application state.
///
/// The storage handle is resolved once at startup and injected here;
/// nothing below the web layer ever asks which backend is live.
#[derive(Clone)]
pub struct AppState {
    /// Resolved storage backend handle.
    pub storage: Arc<Storage>,

    /// Station/train reference data, read-only after startup.
    pub catalog: Arc<Catalog>,

    /// Booking ledger.
    pub ledger: Ledger,

    /// Cookie sessions.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(storage: Storage, catalog: Catalog) -> Self {
        let storage = Arc::new(storage);
        Self {
            ledger: Ledger::new(storage.clone()),
            storage,
            catalog: Arc::new(catalog),
            sessions: Arc::new(SessionStore::new()),
        }
    }
}
