use crate::config::ServeConfig;
use crate::orchestrator::RecommendationOrchestrator;

/// Shared application state.
///
/// Everything inside is immutable after startup, so no lock is needed.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: RecommendationOrchestrator,
    pub config: ServeConfig,
}

impl AppState {
    pub fn new(orchestrator: RecommendationOrchestrator, config: ServeConfig) -> Self {
        Self {
            orchestrator,
            config,
        }
    }
}
