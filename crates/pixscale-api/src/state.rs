//! Application state shared by all handlers.

use pixscale_storage::Storage;
use std::sync::Arc;

/// Built once during startup and handed to the router. Holds no per-request
/// data; the storage handle is safe for concurrent use.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}
