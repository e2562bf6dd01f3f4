use std::sync::Arc;

use crate::config::Config;
use crate::scoring::ScoringEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only scoring engine shared by every request and every batch task.
    pub engine: Arc<ScoringEngine>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let engine = Arc::new(ScoringEngine::new(config.scoring.clone()));
        Self { config, engine }
    }
}
