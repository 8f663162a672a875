mod analysis;
mod config;
mod errors;
mod extraction;
mod nlp;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::vocabulary::SkillVocabulary;
use crate::config::Config;
use crate::extraction::PdfExtractSource;
use crate::nlp::{LanguageModel, RuleBasedModel};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Skill vocabulary: fixed for the life of the process
    let vocabulary = SkillVocabulary::from_path(config.skill_vocabulary_path.as_deref())?;
    info!("Skill vocabulary loaded ({} terms)", vocabulary.len());

    // NLP model: loaded once; failure disables analysis and scoring only
    let model: Option<Arc<dyn LanguageModel>> =
        match RuleBasedModel::load(config.location_gazetteer_path.as_deref()) {
            Ok(model) => {
                info!("NLP model loaded");
                Some(Arc::new(model))
            }
            Err(e) => {
                warn!("Error loading NLP model: {e:#}. Skill detection and match scoring are disabled.");
                None
            }
        };

    let state = AppState {
        config: config.clone(),
        model,
        vocabulary: Arc::new(vocabulary),
        text_source: Arc::new(PdfExtractSource),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
