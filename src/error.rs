use axum::http::StatusCode;
use thiserror::Error;

use crate::constants::API_NAME;
use crate::models::{ApiResponse, ResponseBuilder};
use crate::repository::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing path parameter: {0}")]
    MissingPathParameter(&'static str),

    #[error("Invalid JSON format: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request body is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Car not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConditionFailed { key } => AppError::NotFound(key),
            other => AppError::Store(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingPathParameter(_)
            | AppError::Json(_)
            | AppError::Encoding(_)
            | AppError::MissingFields(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_api_response(self) -> ApiResponse {
        let builder = ResponseBuilder::new(self.status());
        match self {
            AppError::MissingPathParameter(name) => {
                tracing::warn!("{} Missing path parameter: {}", API_NAME, name);
                builder.error(
                    "Missing path parameter",
                    Some(format!("{} is required", name.to_uppercase())),
                )
            }
            AppError::Json(e) => {
                tracing::warn!("{} Invalid JSON body: {}", API_NAME, e);
                builder.error("Invalid JSON format", Some(e.to_string()))
            }
            AppError::Encoding(e) => {
                tracing::warn!("{} Request body is not valid UTF-8: {}", API_NAME, e);
                builder.error("Invalid JSON format", Some(e.to_string()))
            }
            AppError::MissingFields(fields) => {
                tracing::warn!("{} Missing required fields: {}", API_NAME, fields);
                builder.error("Missing required fields", Some(fields))
            }
            AppError::Validation(msg) => {
                tracing::warn!("{} Validation error: {}", API_NAME, msg);
                builder.error("Invalid field values", Some(msg))
            }
            AppError::NotFound(id) => {
                tracing::warn!("{} Car not found: {}", API_NAME, id);
                builder.error("Car not found", None)
            }
            AppError::Store(e) => {
                tracing::error!("{} Store error: {}", API_NAME, e);
                builder.error("Store error", Some(e.to_string()))
            }
            AppError::Internal(e) => {
                tracing::error!("{} Internal error: {:#}", API_NAME, e);
                builder.error("Internal server error", Some(format!("{:#}", e)))
            }
        }
    }
}

impl From<AppError> for ApiResponse {
    fn from(err: AppError) -> Self {
        err.into_api_response()
    }
}
