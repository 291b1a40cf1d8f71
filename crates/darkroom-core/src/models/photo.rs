use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Gallery category a photo is filed under. Doubles as the folder name in
/// the asset store hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "photo_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PhotoCategory {
    Landscape,
    Portrait,
    Wildlife,
    Architecture,
    Nature,
    Street,
    Other,
}

impl Default for PhotoCategory {
    fn default() -> Self {
        PhotoCategory::Landscape
    }
}

impl FromStr for PhotoCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "landscape" => Ok(PhotoCategory::Landscape),
            "portrait" => Ok(PhotoCategory::Portrait),
            "wildlife" => Ok(PhotoCategory::Wildlife),
            "architecture" => Ok(PhotoCategory::Architecture),
            "nature" => Ok(PhotoCategory::Nature),
            "street" => Ok(PhotoCategory::Street),
            "other" => Ok(PhotoCategory::Other),
            _ => Err(anyhow::anyhow!("Unknown photo category: {}", s)),
        }
    }
}

impl Display for PhotoCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            PhotoCategory::Landscape => "landscape",
            PhotoCategory::Portrait => "portrait",
            PhotoCategory::Wildlife => "wildlife",
            PhotoCategory::Architecture => "architecture",
            PhotoCategory::Nature => "nature",
            PhotoCategory::Street => "street",
            PhotoCategory::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Catalog entry for an uploaded photo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    pub photo_id: Uuid,
    pub filename: String,
    pub title: String,
    pub description: String,
    pub category: PhotoCategory,
    pub tags: Vec<String>,
    pub featured: bool,
    pub visible: bool,
    pub price: Decimal,
    pub licensing_available: bool,
    pub width: i32,
    pub height: i32,
    pub original_size_mb: f64,
    pub processed_size_mb: f64,
    /// Public URL of the processed rendition
    pub storage_path: String,
    pub original_asset_id: String,
    pub processed_asset_id: String,
    pub thumbnail_asset_id: String,
    pub location: Option<String>,
    pub date_taken: Option<NaiveDate>,
    pub notes: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a freshly uploaded photo. Curation fields
/// (location, date_taken, notes) start empty and are set via update.
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub photo_id: Uuid,
    pub filename: String,
    pub title: String,
    pub description: String,
    pub category: PhotoCategory,
    pub tags: Vec<String>,
    pub featured: bool,
    pub visible: bool,
    pub price: Decimal,
    pub licensing_available: bool,
    pub width: i32,
    pub height: i32,
    pub original_size_mb: f64,
    pub processed_size_mb: f64,
    pub storage_path: String,
    pub original_asset_id: String,
    pub processed_asset_id: String,
    pub thumbnail_asset_id: String,
}

/// Request DTO for partially updating a catalog entry. Absent fields are
/// left untouched.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhotoRequest {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<PhotoCategory>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub licensing_available: Option<bool>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date_taken: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdatePhotoRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.featured.is_none()
            && self.visible.is_none()
            && self.price.is_none()
            && self.licensing_available.is_none()
            && self.location.is_none()
            && self.date_taken.is_none()
            && self.notes.is_none()
    }
}

/// Catalog listing filter. `None` means the dimension is not filtered.
#[derive(Debug, Clone, Default)]
pub struct PhotoFilter {
    pub visible: Option<bool>,
    pub featured: Option<bool>,
    pub category: Option<PhotoCategory>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Photo response with derived asset URLs
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub photo_id: Uuid,
    pub filename: String,
    pub title: String,
    pub description: String,
    pub category: PhotoCategory,
    pub tags: Vec<String>,
    pub featured: bool,
    pub visible: bool,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub licensing_available: bool,
    pub width: i32,
    pub height: i32,
    #[serde(rename = "originalSizeMB")]
    pub original_size_mb: f64,
    #[serde(rename = "processedSizeMB")]
    pub processed_size_mb: f64,
    pub storage_path: String,
    pub image_url: String,
    pub thumbnail_url: String,
    pub location: Option<String>,
    pub date_taken: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Display date: capture date when known, otherwise the upload date
    pub date: String,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Successful upload response
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub photo: PhotoResponse,
}

impl Photo {
    /// Build the response DTO, deriving asset retrieval URLs under the
    /// given API prefix.
    pub fn into_response(self, api_prefix: &str) -> PhotoResponse {
        let date = self
            .date_taken
            .map(|d| d.to_string())
            .unwrap_or_else(|| self.uploaded_at.date_naive().to_string());
        PhotoResponse {
            image_url: format!("{}/photos/{}/file", api_prefix, self.photo_id),
            thumbnail_url: format!("{}/photos/{}/file?size=thumb", api_prefix, self.photo_id),
            date,
            photo_id: self.photo_id,
            filename: self.filename,
            title: self.title,
            description: self.description,
            category: self.category,
            tags: self.tags,
            featured: self.featured,
            visible: self.visible,
            price: self.price,
            licensing_available: self.licensing_available,
            width: self.width,
            height: self.height,
            original_size_mb: self.original_size_mb,
            processed_size_mb: self.processed_size_mb,
            storage_path: self.storage_path,
            location: self.location,
            date_taken: self.date_taken,
            notes: self.notes,
            uploaded_at: self.uploaded_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_photo() -> Photo {
        Photo {
            photo_id: Uuid::new_v4(),
            filename: "sunrise.jpg".to_string(),
            title: "Mountain Sunrise".to_string(),
            description: String::new(),
            category: PhotoCategory::Landscape,
            tags: vec!["mountains".to_string()],
            featured: false,
            visible: true,
            price: Decimal::new(4999, 2),
            licensing_available: true,
            width: 3200,
            height: 2133,
            original_size_mb: 8.2,
            processed_size_mb: 1.4,
            storage_path: "http://localhost:8080/assets/processed/x.jpg".to_string(),
            original_asset_id: "originals/x.jpg".to_string(),
            processed_asset_id: "processed/x.jpg".to_string(),
            thumbnail_asset_id: "thumbnails/x.jpg".to_string(),
            location: None,
            date_taken: None,
            notes: None,
            uploaded_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_category_parsing_is_case_insensitive() {
        assert_eq!(
            "Wildlife".parse::<PhotoCategory>().unwrap(),
            PhotoCategory::Wildlife
        );
        assert_eq!(
            "LANDSCAPE".parse::<PhotoCategory>().unwrap(),
            PhotoCategory::Landscape
        );
        assert!("sports".parse::<PhotoCategory>().is_err());
    }

    #[test]
    fn test_category_display_round_trips() {
        for category in [
            PhotoCategory::Landscape,
            PhotoCategory::Portrait,
            PhotoCategory::Wildlife,
            PhotoCategory::Architecture,
            PhotoCategory::Nature,
            PhotoCategory::Street,
            PhotoCategory::Other,
        ] {
            assert_eq!(
                category.to_string().parse::<PhotoCategory>().unwrap(),
                category
            );
        }
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = sample_photo().into_response("/api/v0");
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("photoId").is_some());
        assert!(json.get("licensingAvailable").is_some());
        assert!(json.get("originalSizeMB").is_some());
        assert!(json.get("processedSizeMB").is_some());
        assert!(json.get("storagePath").is_some());
        assert_eq!(json["price"], serde_json::json!(49.99));
    }

    #[test]
    fn test_response_urls_use_api_prefix() {
        let photo = sample_photo();
        let id = photo.photo_id;
        let response = photo.into_response("/api/v0");
        assert_eq!(response.image_url, format!("/api/v0/photos/{}/file", id));
        assert_eq!(
            response.thumbnail_url,
            format!("/api/v0/photos/{}/file?size=thumb", id)
        );
    }

    #[test]
    fn test_display_date_prefers_capture_date() {
        let mut photo = sample_photo();
        photo.date_taken = NaiveDate::from_ymd_opt(2024, 3, 15);
        let response = photo.into_response("/api/v0");
        assert_eq!(response.date, "2024-03-15");

        let photo = sample_photo();
        let expected = photo.uploaded_at.date_naive().to_string();
        assert_eq!(photo.into_response("/api/v0").date, expected);
    }

    #[test]
    fn test_update_request_title_length_validation() {
        let request = UpdatePhotoRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = UpdatePhotoRequest {
            title: Some("Mountain Sunrise".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_is_empty() {
        assert!(UpdatePhotoRequest::default().is_empty());
        let request = UpdatePhotoRequest {
            featured: Some(true),
            ..Default::default()
        };
        assert!(!request.is_empty());
    }
}
