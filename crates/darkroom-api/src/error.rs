//! HTTP error handling
//!
//! Bridges `AppError` into axum responses. Each variant carries its own
//! status code, machine-readable code, and client-facing message via the
//! `ErrorMetadata` trait; this module decides how much of that surfaces
//! to the caller based on environment and sensitivity.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use darkroom_core::{AppError, ErrorMetadata, LogLevel};
use darkroom_storage::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use utoipa::ToSchema;

/// Error payload returned by every failing endpoint.
///
/// `details` and `errorType` are populated only outside production and
/// only for non-sensitive errors.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Client-facing message
    pub error: String,
    /// Error chain, development only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Variant name, development only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable code, e.g. "DECODE_ERROR"
    pub code: String,
    /// Whether retrying the request may succeed
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Newtype wrapper so `AppError` can implement `IntoResponse` from this
/// crate.
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON extractor that converts deserialization failures into the standard
/// error payload instead of axum's plain-text rejection.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ValidatedJson(value))
    }
}

/// Log an error at the level its metadata asks for.
fn log_error(error: &AppError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = code, "Request failed")
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = code, "Request failed")
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_details = %error.detailed_message(), code = code, "Request failed")
        }
    }
}

/// Whether we are running in production mode. Checks `ENVIRONMENT` first,
/// then `APP_ENV`.
fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let error = &self.0;
        let status = StatusCode::from_u16(error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(error);

        // The oversize rejection keeps the exact JSON shape the portfolio
        // frontend already parses.
        if let AppError::FileTooLarge {
            current_bytes,
            max_bytes,
        } = error
        {
            let body = serde_json::json!({
                "error": "FILE_TOO_LARGE",
                "message": error.client_message(),
                "maxSize": *max_bytes / (1024 * 1024),
                "currentSize": (*current_bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0,
            });
            return (status, Json(body)).into_response();
        }

        let hide_details = is_production_env() || error.is_sensitive();
        let body = ErrorResponse {
            error: error.client_message(),
            details: if hide_details {
                None
            } else {
                Some(error.detailed_message())
            },
            error_type: if hide_details {
                None
            } else {
                Some(error.error_type().to_string())
            },
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
            suggested_action: error.suggested_action().map(String::from),
        };

        (status, Json(body)).into_response()
    }
}
