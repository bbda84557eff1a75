pub mod config;
pub mod error;
pub mod store;
pub mod students;
pub mod types;

use std::sync::Arc;

use store::StudentStore;

/// Shared application state
pub struct AppState {
    pub store: Box<dyn StudentStore>,
}

impl AppState {
    pub fn new(store: Box<dyn StudentStore>) -> Arc<Self> {
        Arc::new(Self { store })
    }
}
