//! Model and schema introspection handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::logic::features::layout::{layout_hash, LayoutInfo, FEATURE_VERSION};
use crate::logic::model::InferenceStats;
use crate::logic::threat::ThreatDescriptor;
use crate::AppState;

/// Engine Status for clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_path: Option<String>,
    pub model_sha256: Option<String>,
    pub loaded_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(flatten)]
    pub stats: InferenceStats,
    pub feature_version: u8,
    pub layout_hash: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub label: i64,
    #[serde(flatten)]
    pub descriptor: ThreatDescriptor,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaResponse {
    #[serde(flatten)]
    pub layout: LayoutInfo,
    pub labels: Vec<CatalogEntry>,
    pub fallback: ThreatDescriptor,
}

/// Current classifier status
pub async fn status(State(state): State<AppState>) -> Json<EngineStatus> {
    let classifier = state.analyzer.classifier();
    let metadata = classifier.and_then(|c| c.metadata());

    Json(EngineStatus {
        model_loaded: classifier.is_some(),
        model_path: metadata.as_ref().map(|m| m.model_path.clone()),
        model_sha256: metadata.as_ref().map(|m| m.sha256.clone()),
        loaded_at: metadata.as_ref().map(|m| m.loaded_at),
        stats: classifier.map(|c| c.stats()).unwrap_or_default(),
        feature_version: FEATURE_VERSION,
        layout_hash: layout_hash(),
    })
}

/// Required columns and label table
pub async fn schema(State(state): State<AppState>) -> Json<SchemaResponse> {
    let catalog = state.analyzer.catalog();

    Json(SchemaResponse {
        layout: LayoutInfo::current(),
        labels: catalog
            .iter()
            .map(|(label, descriptor)| CatalogEntry {
                label,
                descriptor: descriptor.clone(),
            })
            .collect(),
        fallback: catalog.fallback().clone(),
    })
}
