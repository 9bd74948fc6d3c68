use std::sync::Arc;

use crate::config::{Config, EngineConfig};
use crate::stores::{
    BodyShapeClassifier, CatalogStore, ExplanationGenerator, FeedbackStore,
    InMemoryCatalogStore, InMemoryFeedbackStore, JsonFileCatalogStore, JsonFileFeedbackStore,
};

/// Shared application state.
///
/// The engine itself is stateless; this holds the store handles and the
/// engine tunables. Optional collaborators default to absent, which the
/// handlers treat as "no signal", never as an error.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub feedback: Arc<dyn FeedbackStore>,
    pub classifier: Option<Arc<dyn BodyShapeClassifier>>,
    pub explainer: Option<Arc<dyn ExplanationGenerator>>,
    pub engine: EngineConfig,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// In-memory state with default tunables, as used by tests
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(InMemoryCatalogStore::new()),
            feedback: Arc::new(InMemoryFeedbackStore::new()),
            classifier: None,
            explainer: None,
            engine: EngineConfig::default(),
        }
    }

    /// State backed by the JSON-file stores under `config.data_dir`
    pub fn from_config(config: &Config, engine: EngineConfig) -> Self {
        Self {
            catalog: Arc::new(JsonFileCatalogStore::new(&config.data_dir)),
            feedback: Arc::new(JsonFileFeedbackStore::new(&config.data_dir)),
            classifier: None,
            explainer: None,
            engine,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn BodyShapeClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_explainer(mut self, explainer: Arc<dyn ExplanationGenerator>) -> Self {
        self.explainer = Some(explainer);
        self
    }
}
