use darkroom_core::AppError;

/// Errors from the image pipeline.
///
/// `Decode` is fatal for an upload: a file that cannot be decoded produces
/// no variants. `MetadataUnavailable` and `Watermark` are recoverable; the
/// pipeline substitutes defaults or skips the overlay instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Image metadata unavailable: {0}")]
    MetadataUnavailable(String),

    #[error("Watermark rendering failed: {0}")]
    Watermark(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

impl From<ProcessError> for AppError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Decode(msg) => AppError::Decode(msg),
            ProcessError::MetadataUnavailable(msg) => AppError::Processing(msg),
            ProcessError::Watermark(msg) => AppError::Processing(msg),
            ProcessError::Encode(msg) => AppError::Processing(msg),
        }
    }
}
