use cinder::KeyValueFacade;
use std::sync::Arc;
use store_memory::MemoryStore;

/// Server state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub kv: KeyValueFacade,
}

impl AppState {
    /// Facade over the in-process store with the JSON codec. Deployments
    /// backed by a remote store construct the facade with their own client
    /// and hand it in the same way.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self { kv: KeyValueFacade::with_json_codec(store) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
