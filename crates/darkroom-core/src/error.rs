//! Error types module
//!
//! This module provides the core error types used throughout the Darkroom
//! application. All errors are unified under the `AppError` enum, covering
//! the upload pipeline stages (validation, decode, processing, publication,
//! catalog write) plus the usual database and internal failures.

use std::io;

use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DECODE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("File too large: {current_bytes} bytes exceeds maximum of {max_bytes} bytes")]
    FileTooLarge { current_bytes: usize, max_bytes: usize },

    #[error("Multipart error: {0}")]
    Multipart(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Image processing error: {0}")]
    Processing(String),

    #[error("Publish error: {0}")]
    Publish(String),

    #[error("Catalog write error: {0}")]
    CatalogWrite(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

// Error conversion implementations
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(format!("UUID parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Reduces duplication in ErrorMetadata impl; client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Validation(_) => (
            400,
            "VALIDATION_ERROR",
            true,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::FileTooLarge { .. } => (
            413,
            "FILE_TOO_LARGE",
            true,
            Some("Compress the image or raise the upload limit"),
            false,
            LogLevel::Debug,
        ),
        AppError::Multipart(_) => (
            400,
            "MULTIPART_ERROR",
            true,
            Some("Check the multipart form encoding"),
            false,
            LogLevel::Debug,
        ),
        AppError::Decode(_) => (
            500,
            "DECODE_ERROR",
            false,
            Some("Verify the file is a valid image and try a different one"),
            false,
            LogLevel::Warn,
        ),
        AppError::Processing(_) => (
            500,
            "PROCESSING_ERROR",
            false,
            Some("Try a different image"),
            false,
            LogLevel::Error,
        ),
        AppError::Publish(_) => (
            500,
            "PUBLISH_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::CatalogWrite(_) => (
            500,
            "CATALOG_WRITE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the photo ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::Config(_) => (
            500,
            "CONFIG_ERROR",
            false,
            Some("Check server configuration"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Validation(_) => "Validation",
            AppError::FileTooLarge { .. } => "FileTooLarge",
            AppError::Multipart(_) => "Multipart",
            AppError::Decode(_) => "Decode",
            AppError::Processing(_) => "Processing",
            AppError::Publish(_) => "Publish",
            AppError::CatalogWrite(_) => "CatalogWrite",
            AppError::NotFound(_) => "NotFound",
            AppError::Config(_) => "Config",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        // Add source error chain
        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access the photo catalog".to_string(),
            AppError::Validation(ref msg) => msg.clone(),
            AppError::FileTooLarge {
                current_bytes,
                max_bytes,
            } => {
                format!(
                    "File size exceeds {}MB limit. Current size: {:.2}MB",
                    max_bytes / (1024 * 1024),
                    *current_bytes as f64 / (1024.0 * 1024.0)
                )
            }
            AppError::Multipart(ref msg) => msg.clone(),
            AppError::Decode(_) => "Failed to decode image data".to_string(),
            AppError::Processing(_) => "Failed to process image".to_string(),
            AppError::Publish(_) => "Failed to publish photo assets".to_string(),
            AppError::CatalogWrite(_) => "Failed to record photo in the catalog".to_string(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Config(_) => "Server configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
