//! Multipart form parsing for photo uploads.

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use darkroom_core::{AppError, PhotoCategory};
use rust_decimal::Decimal;

use crate::services::upload::{PhotoForm, UploadedFile};

const MAX_FILENAME_LENGTH: usize = 255;

/// Read the multipart request into a `PhotoForm`.
///
/// Exactly one `file` part is accepted; unknown parts are skipped so
/// frontend form additions do not break uploads. Metadata fields are
/// parsed eagerly so a bad value rejects the request before any
/// processing starts.
pub async fn extract_photo_form(mut multipart: Multipart) -> Result<PhotoForm, AppError> {
    let mut form = PhotoForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Multipart(format!("Failed to read multipart form: {}", e)))?
    {
        let name = field.name().map(|n| n.to_string()).unwrap_or_default();
        match name.as_str() {
            "file" => {
                if form.file.is_some() {
                    return Err(AppError::Validation(
                        "Multiple file parts are not allowed; send exactly one part named 'file'"
                            .to_string(),
                    ));
                }
                let filename = field
                    .file_name()
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| "upload.jpg".to_string());
                let content_type = field
                    .content_type()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Multipart(format!("Failed to read file data: {}", e)))?;
                form.file = Some(UploadedFile {
                    data,
                    filename,
                    content_type,
                });
            }
            "title" => form.title = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "category" => {
                let text = read_text(field).await?;
                form.category = Some(
                    text.trim()
                        .parse::<PhotoCategory>()
                        .map_err(|e| AppError::Validation(e.to_string()))?,
                );
            }
            "tags" => {
                let text = read_text(field).await?;
                append_tags(&mut form.tags, &text);
            }
            "featured" => form.featured = read_text(field).await? == "true",
            "price" => {
                let text = read_text(field).await?;
                form.price = Some(parse_price(&text)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Multipart(format!("Failed to read form field: {}", e)))
}

/// Comma-separated tags: trimmed, empties dropped, first occurrence wins.
fn append_tags(tags: &mut Vec<String>, text: &str) {
    for raw in text.split(',') {
        let tag = raw.trim();
        if tag.is_empty() {
            continue;
        }
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
}

fn parse_price(text: &str) -> Result<Decimal, AppError> {
    let price = text
        .trim()
        .parse::<Decimal>()
        .map_err(|_| AppError::Validation(format!("Invalid price: {}", text)))?;
    if price.is_sign_negative() {
        return Err(AppError::Validation(
            "Price must not be negative".to_string(),
        ));
    }
    Ok(price)
}

/// Sanitize a client-supplied filename: strip any directory part, reject
/// traversal sequences, and replace characters outside `[A-Za-z0-9._-]`.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    let path = std::path::Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if filename_only.contains("..") {
        return Err(AppError::Validation(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim().is_empty() || sanitized.len() < 3 {
        return Ok("file".to_string());
    }

    Ok(sanitized)
}

/// Derive a display title from the filename stem.
pub fn title_from_filename(filename: &str) -> String {
    let stem = std::path::Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .trim()
        .to_string();
    if stem.is_empty() {
        "Untitled".to_string()
    } else {
        stem
    }
}

/// Lowercased file extension, defaulting to jpg for extension-less names.
pub fn file_extension(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "jpg".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_accepts_normal_names() {
        assert_eq!(
            sanitize_filename("morning_mist.jpg").unwrap(),
            "morning_mist.jpg"
        );
        assert_eq!(
            sanitize_filename("IMG-2024 001.jpeg").unwrap(),
            "IMG-2024_001.jpeg"
        );
    }

    #[test]
    fn test_sanitize_filename_strips_directories() {
        assert_eq!(
            sanitize_filename("/var/uploads/sunset.jpg").unwrap(),
            "sunset.jpg"
        );
    }

    #[test]
    fn test_sanitize_filename_rejects_traversal() {
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("a..b.jpg").is_err());
    }

    #[test]
    fn test_sanitize_filename_replaces_special_characters() {
        assert_eq!(
            sanitize_filename("shot (1) @ dusk!.jpg").unwrap(),
            "shot__1____dusk_.jpg"
        );
    }

    #[test]
    fn test_sanitize_filename_falls_back_for_tiny_names() {
        assert_eq!(sanitize_filename("a").unwrap(), "file");
        assert_eq!(sanitize_filename("").unwrap(), "file");
    }

    #[test]
    fn test_append_tags_dedupes_and_trims() {
        let mut tags = Vec::new();
        append_tags(&mut tags, "sunset, bridge ,sunset,,  ");
        append_tags(&mut tags, "bridge,fog");
        assert_eq!(tags, vec!["sunset", "bridge", "fog"]);
    }

    #[test]
    fn test_parse_price_rejects_garbage_and_negatives() {
        assert!(parse_price("abc").is_err());
        assert!(parse_price("-5").is_err());
        assert_eq!(parse_price(" 129.50 ").unwrap(), Decimal::new(12950, 2));
    }

    #[test]
    fn test_title_from_filename_uses_stem() {
        assert_eq!(title_from_filename("golden_gate-dusk.jpg"), "golden_gate-dusk");
        assert_eq!(title_from_filename(".jpg"), ".jpg");
        assert_eq!(title_from_filename(""), "Untitled");
    }

    #[test]
    fn test_file_extension_defaults_to_jpg() {
        assert_eq!(file_extension("photo.PNG"), "png");
        assert_eq!(file_extension("photo"), "jpg");
    }
}
