//! Analyze handler - CSV upload → threat report

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};

use crate::logic::features::RawTable;
use crate::logic::threat::AnalysisReport;
use crate::{AppError, AppResult, AppState};

/// Multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

/// Classify every row of an uploaded CSV
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<AnalysisReport>> {
    let (file_name, bytes) = read_csv_upload(&mut multipart).await?;
    tracing::debug!("Received {} ({} bytes)", file_name, bytes.len());

    let analyzer = state.analyzer.clone();
    let report = tokio::task::spawn_blocking(move || -> AppResult<AnalysisReport> {
        let table = RawTable::from_csv_bytes(&bytes)?;
        Ok(analyzer.analyze(table)?)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Analysis task failed: {}", e)))??;

    Ok(Json(report))
}

/// First `file` field of the form; must be a `.csv`
async fn read_csv_upload(multipart: &mut Multipart) -> AppResult<(String, Bytes)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !file_name.to_ascii_lowercase().ends_with(".csv") {
            return Err(AppError::ValidationError("Only CSV files are allowed".to_string()));
        }

        let bytes = field.bytes().await?;
        return Ok((file_name, bytes));
    }

    Err(AppError::ValidationError(format!("Missing '{}' field in form data", FILE_FIELD)))
}
