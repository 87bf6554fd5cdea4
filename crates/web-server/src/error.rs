use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dataset::DatasetError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Unmatched filter values (a date, product or expiration with no trades) are
/// designed 404s; everything else is an internal error with the detail kept
/// in the logs.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Dataset(err) => match &err {
                DatasetError::DateNotFound(_)
                | DatasetError::PositionNotFound { .. }
                | DatasetError::ExpirationNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                _ => {
                    tracing::error!(error = ?err, "Dataset error.");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal dataset error occurred".to_string(),
                    )
                }
            },
            AppError::Analytics(err) => {
                tracing::error!(error = ?err, "Analytics error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred during analytics calculation".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
