use std::sync::Arc;

use crate::bot::Router;

/// Shared state for every worker: one router over the loaded dataset.
pub struct AppState {
    pub router: Arc<Router>,
}

impl AppState {
    pub fn new(router: Router) -> Self {
        Self {
            router: Arc::new(router),
        }
    }
}
