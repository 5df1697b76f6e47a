use std::sync::Arc;

use crate::services::{Clock, ExampleCatalog, Library, TrackedItemStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub library: Library,
}

impl AppState {
    /// Creates state over the given store, example catalog and clock
    pub fn new(
        store: Arc<dyn TrackedItemStore>,
        catalog: Arc<dyn ExampleCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            library: Library::new(store, catalog, clock),
        }
    }
}
