//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::DelayCache;

/// Shared application state.
pub struct AppState<F> {
    /// Delayed-train cache in front of the vehicle feed
    pub cache: Arc<DelayCache<F>>,
}

impl<F> AppState<F> {
    /// Create a new app state.
    pub fn new(cache: DelayCache<F>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }
}

// Manual impl so `F` need not be `Clone`.
impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}
