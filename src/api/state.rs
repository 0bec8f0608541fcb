//! Application state for the API server

use crate::{Config, GifPipeline};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone). Holds no per-request data;
/// conversions share nothing but the filesystem.
#[derive(Clone)]
pub struct AppState {
    /// Conversion pipeline bound to the located tools
    pub pipeline: Arc<GifPipeline>,

    /// Configuration (read-only)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(pipeline: Arc<GifPipeline>, config: Arc<Config>) -> Self {
        Self { pipeline, config }
    }
}
