//! Application state for the API server

use crate::core::relay::CountryRelay;
use std::sync::Arc;

/// Shared state handed to every route handler; cloning is an `Arc` bump.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<CountryRelay>,
}

impl AppState {
    pub fn new(relay: Arc<CountryRelay>) -> Self {
        Self { relay }
    }
}
