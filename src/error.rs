//! Error handling

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::logic::features::TableError;
use crate::logic::AnalysisError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Upload errors
    ValidationError(String),
    PayloadTooLarge(String),

    // Pipeline errors
    MissingColumns(Vec<String>),
    ModelUnavailable,
    ProcessingError(String),

    // Generic errors
    InternalError(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::MissingColumns(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ProcessingError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (error_message, detail) = match &self {
            AppError::ValidationError(msg) => ("Invalid upload", msg.clone()),
            AppError::PayloadTooLarge(msg) => ("Upload too large", msg.clone()),
            AppError::MissingColumns(cols) => {
                tracing::warn!("Rejected upload, missing columns: {:?}", cols);
                ("Missing required columns", format!("Missing required columns: {}", cols.join(", ")))
            }
            AppError::ModelUnavailable => {
                tracing::error!("Analysis requested but no model is loaded");
                ("Model unavailable", "ML model not loaded".to_string())
            }
            AppError::ProcessingError(msg) => {
                tracing::error!("Processing error: {}", msg);
                ("Processing error", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error", msg.clone())
            }
        };

        let mut body = json!({
            "error": error_message,
            "detail": detail,
            "status": status.as_u16()
        });
        if let AppError::MissingColumns(cols) = &self {
            body["missingColumns"] = json!(cols);
        }

        (status, Json(body)).into_response()
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Schema(e) => AppError::MissingColumns(e.missing),
            AnalysisError::ModelUnavailable => AppError::ModelUnavailable,
            e @ AnalysisError::Processing(_) => AppError::ProcessingError(e.to_string()),
        }
    }
}

impl From<TableError> for AppError {
    fn from(err: TableError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.body_text())
        } else {
            AppError::ValidationError(err.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::SchemaError;

    #[test]
    fn test_status_mapping() {
        let schema: AppError = AnalysisError::Schema(SchemaError {
            missing: vec!["udp.port".to_string()],
        })
        .into();
        assert_eq!(schema.status(), StatusCode::BAD_REQUEST);

        let model: AppError = AnalysisError::ModelUnavailable.into();
        assert_eq!(model.status(), StatusCode::SERVICE_UNAVAILABLE);

        let processing: AppError = AnalysisError::Processing("boom".to_string()).into();
        assert_eq!(processing.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(processing, AppError::ProcessingError(msg) if msg == "Error processing data: boom"));
    }

    #[test]
    fn test_table_error_is_client_error() {
        let err: AppError = TableError::MissingHeader.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
