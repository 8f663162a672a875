use std::sync::Arc;

use crate::analysis::vocabulary::SkillVocabulary;
use crate::config::Config;
use crate::extraction::TextSource;
use crate::nlp::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup. `None` when loading failed: uploads still return
    /// raw text, but skill detection and match scoring are unavailable.
    pub model: Option<Arc<dyn LanguageModel>>,
    pub vocabulary: Arc<SkillVocabulary>,
    pub text_source: Arc<dyn TextSource>,
}
