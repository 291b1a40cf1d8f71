use darkroom_core::AppError;

/// Validation errors for uploaded files
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("No file provided")]
    MissingFile,

    #[error("File too large: {current} bytes (max: {max} bytes)")]
    FileTooLarge { current: usize, max: usize },

    #[error("Unsupported media type: {0} (expected an image)")]
    UnsupportedMediaType(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingFile => AppError::Validation("No file provided".to_string()),
            ValidationError::FileTooLarge { current, max } => AppError::FileTooLarge {
                current_bytes: current,
                max_bytes: max,
            },
            ValidationError::UnsupportedMediaType(content_type) => AppError::Validation(format!(
                "Unsupported media type: {} (expected an image)",
                content_type
            )),
        }
    }
}

/// Upload validator
///
/// Checks presence, size, and declared content type of an uploaded file.
/// The content type check trusts the client's declaration; a spoofed
/// `image/*` type passes here and fails later at decode.
pub struct UploadValidator {
    max_size_bytes: usize,
}

impl UploadValidator {
    pub fn new(max_size_bytes: usize) -> Self {
        Self { max_size_bytes }
    }

    pub fn max_size_bytes(&self) -> usize {
        self.max_size_bytes
    }

    pub fn validate(&self, data: &[u8], content_type: &str) -> Result<(), ValidationError> {
        if data.is_empty() {
            return Err(ValidationError::MissingFile);
        }

        if data.len() > self.max_size_bytes {
            return Err(ValidationError::FileTooLarge {
                current: data.len(),
                max: self.max_size_bytes,
            });
        }

        // Strip parameters ("image/jpeg; charset=binary" -> "image/jpeg")
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase();

        if !media_type.starts_with("image/") {
            return Err(ValidationError::UnsupportedMediaType(media_type));
        }

        Ok(())
    }
}
