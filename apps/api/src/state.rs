use std::sync::Arc;

use crate::config::Config;
use crate::layout::LayoutSettings;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Geometry, labels and pagination mode applied to every export.
    pub layout: Arc<LayoutSettings>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let layout = Arc::new(config.layout_settings());
        AppState { config, layout }
    }
}
