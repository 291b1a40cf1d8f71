//! Shared key helpers for storage backends.

/// Guess the MIME type for an asset key from its extension.
///
/// Published variants are always JPEG; originals keep whatever extension
/// they were uploaded with.
pub(crate) fn content_type_for_key(key: &str) -> String {
    let extension = key
        .rsplit('.')
        .next()
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
    .to_string()
}
