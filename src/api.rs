//! HTTP API for the voice skill
//!
//! One webhook endpoint the voice platform posts request envelopes to, plus
//! health and version probes.

mod handlers;
mod types;

pub use handlers::create_router;

use crate::skill::Dispatcher;
use std::sync::Arc;

/// Application state shared across handlers
///
/// Read-only after startup; per-session data travels in the request envelope.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}
