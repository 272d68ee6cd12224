//! Flow Threat Analyzer Server
//!
//! Classifies uploaded network-flow CSVs into threat categories.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   FLOW THREAT ANALYZER                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌──────────────────────┐  │
//! │  │  API      │  │  Normalizer  │  │  Result Synthesizer  │  │
//! │  │  (Axum)   │─►│  (features)  │─►│  (threat)            │  │
//! │  └───────────┘  └──────┬───────┘  └──────────▲───────────┘  │
//! │                        ▼                     │ labels       │
//! │                 ┌─────────────┐              │              │
//! │                 │ ONNX model  │──────────────┘              │
//! │                 └─────────────┘                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use logic::features::LayoutInfo;
use logic::threat::ThreatCatalog;
use logic::Analyzer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    init_tracing(&config);

    tracing::info!("Flow Threat Analyzer starting...");

    let layout = LayoutInfo::current();
    tracing::info!(
        "Feature layout v{} (hash: {:08x}, {} columns)",
        layout.version,
        layout.hash,
        layout.feature_count
    );

    // Load classifier (absent handle if it fails)
    let classifier = logic::model::load_classifier(&config.model_path, config.inference_threads);
    if classifier.is_none() {
        tracing::warn!("Serving without a model; /analyze will return 503");
    }

    let state = AppState {
        analyzer: Analyzer::new(classifier, Arc::new(ThreatCatalog::standard())),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = config.bind_addr();
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing(config: &config::Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "flow_threat_analyzer=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(handlers::health::check))
        // Analysis (root path kept for existing dashboards)
        .route("/analyze", post(handlers::analyze::analyze))
        .route("/api/v1/analyze", post(handlers::analyze::analyze))
        // Introspection
        .route("/api/v1/model", get(handlers::model::status))
        .route("/api/v1/schema", get(handlers::model::schema))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
