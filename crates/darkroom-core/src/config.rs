//! Configuration module
//!
//! Application configuration loaded from environment variables (with `.env`
//! support). Every knob has a default suitable for local development; the
//! hosted deployment profile overrides the upload ceiling and storage
//! backend through the environment.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

// Common constants
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_UPLOAD_SIZE_MB: usize = 500;
const JPEG_QUALITY: u8 = 75;
const THUMBNAIL_JPEG_QUALITY: u8 = 80;
const PROCESSED_MAX_WIDTH: u32 = 3200;
const PROCESSED_MAX_HEIGHT: u32 = 2400;
const THUMBNAIL_WIDTH: u32 = 400;
const THUMBNAIL_HEIGHT: u32 = 300;
const WATERMARK_OPACITY: f32 = 0.6;
const WATERMARK_SIZE_DIVISOR: u32 = 16;
const PUBLISH_TIMEOUT_SECS: u64 = 30;

/// Asset storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Local,
    S3,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "s3" => Ok(StorageBackend::S3),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::S3 => write!(f, "s3"),
        }
    }
}

/// Catalog (photo metadata) backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogBackend {
    Postgres,
    Memory,
}

impl FromStr for CatalogBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" => Ok(CatalogBackend::Postgres),
            "memory" => Ok(CatalogBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid catalog backend: {}", s)),
        }
    }
}

impl Display for CatalogBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CatalogBackend::Postgres => write!(f, "postgres"),
            CatalogBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub local_storage_path: String,
    pub public_base_url: String,
    pub s3_bucket: Option<String>,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    pub s3_prefix: String,
    // Catalog configuration
    pub catalog_backend: CatalogBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Upload / pipeline configuration
    pub max_upload_size_bytes: usize,
    pub jpeg_quality: u8,
    pub thumbnail_jpeg_quality: u8,
    pub processed_max_width: u32,
    pub processed_max_height: u32,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    pub watermark_text: String,
    pub watermark_opacity: f32,
    pub watermark_size_divisor: u32,
    pub watermark_font_path: Option<String>,
    pub default_image_width: u32,
    pub default_image_height: u32,
    pub publish_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .parse::<StorageBackend>()?;

        let catalog_backend = env::var("CATALOG_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .parse::<CatalogBackend>()?;

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            storage_backend,
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| "./data/assets".to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string())
                .trim_end_matches('/')
                .to_string(),
            s3_bucket: env::var("S3_BUCKET").ok().filter(|s| !s.is_empty()),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .unwrap_or_else(|_| "us-east-1".to_string()),
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            s3_prefix: env::var("S3_PREFIX").unwrap_or_else(|_| "darkroom".to_string()),
            catalog_backend,
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            db_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DATABASE_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            jpeg_quality: env::var("JPEG_QUALITY")
                .unwrap_or_else(|_| JPEG_QUALITY.to_string())
                .parse()
                .unwrap_or(JPEG_QUALITY),
            thumbnail_jpeg_quality: env::var("THUMBNAIL_JPEG_QUALITY")
                .unwrap_or_else(|_| THUMBNAIL_JPEG_QUALITY.to_string())
                .parse()
                .unwrap_or(THUMBNAIL_JPEG_QUALITY),
            processed_max_width: env::var("PROCESSED_MAX_WIDTH")
                .unwrap_or_else(|_| PROCESSED_MAX_WIDTH.to_string())
                .parse()
                .unwrap_or(PROCESSED_MAX_WIDTH),
            processed_max_height: env::var("PROCESSED_MAX_HEIGHT")
                .unwrap_or_else(|_| PROCESSED_MAX_HEIGHT.to_string())
                .parse()
                .unwrap_or(PROCESSED_MAX_HEIGHT),
            thumbnail_width: env::var("THUMBNAIL_WIDTH")
                .unwrap_or_else(|_| THUMBNAIL_WIDTH.to_string())
                .parse()
                .unwrap_or(THUMBNAIL_WIDTH),
            thumbnail_height: env::var("THUMBNAIL_HEIGHT")
                .unwrap_or_else(|_| THUMBNAIL_HEIGHT.to_string())
                .parse()
                .unwrap_or(THUMBNAIL_HEIGHT),
            watermark_text: env::var("WATERMARK_TEXT")
                .unwrap_or_else(|_| "© Darkroom Studio".to_string()),
            watermark_opacity: env::var("WATERMARK_OPACITY")
                .unwrap_or_else(|_| WATERMARK_OPACITY.to_string())
                .parse()
                .unwrap_or(WATERMARK_OPACITY),
            watermark_size_divisor: env::var("WATERMARK_SIZE_DIVISOR")
                .unwrap_or_else(|_| WATERMARK_SIZE_DIVISOR.to_string())
                .parse()
                .unwrap_or(WATERMARK_SIZE_DIVISOR),
            watermark_font_path: env::var("WATERMARK_FONT_PATH").ok().filter(|s| !s.is_empty()),
            default_image_width: env::var("DEFAULT_IMAGE_WIDTH")
                .unwrap_or_else(|_| PROCESSED_MAX_WIDTH.to_string())
                .parse()
                .unwrap_or(PROCESSED_MAX_WIDTH),
            default_image_height: env::var("DEFAULT_IMAGE_HEIGHT")
                .unwrap_or_else(|_| PROCESSED_MAX_HEIGHT.to_string())
                .parse()
                .unwrap_or(PROCESSED_MAX_HEIGHT),
            publish_timeout_secs: env::var("PUBLISH_TIMEOUT_SECS")
                .unwrap_or_else(|_| PUBLISH_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(PUBLISH_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn max_upload_size_mb(&self) -> usize {
        self.max_upload_size_bytes / (1024 * 1024)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.port == 0 {
            return Err(anyhow::anyhow!("PORT must be non-zero"));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be non-zero"));
        }

        if !(75..=90).contains(&self.jpeg_quality) {
            return Err(anyhow::anyhow!(
                "JPEG_QUALITY must be between 75 and 90, got {}",
                self.jpeg_quality
            ));
        }

        if !(0.15..=0.7).contains(&self.watermark_opacity) {
            return Err(anyhow::anyhow!(
                "WATERMARK_OPACITY must be between 0.15 and 0.7, got {}",
                self.watermark_opacity
            ));
        }

        if !(8..=40).contains(&self.watermark_size_divisor) {
            return Err(anyhow::anyhow!(
                "WATERMARK_SIZE_DIVISOR must be between 8 and 40, got {}",
                self.watermark_size_divisor
            ));
        }

        if self.processed_max_width == 0
            || self.processed_max_height == 0
            || self.thumbnail_width == 0
            || self.thumbnail_height == 0
            || self.default_image_width == 0
            || self.default_image_height == 0
        {
            return Err(anyhow::anyhow!("Image dimensions must be non-zero"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using the s3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_empty() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using the local storage backend"
                    ));
                }
            }
        }

        if self.catalog_backend == CatalogBackend::Postgres {
            match &self.database_url {
                Some(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {
                }
                Some(_) => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be a valid PostgreSQL connection string"
                    ));
                }
                None => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be set when using the postgres catalog backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            storage_backend: StorageBackend::Local,
            local_storage_path: "./data/assets".to_string(),
            public_base_url: "http://localhost:8080".to_string(),
            s3_bucket: None,
            s3_region: "us-east-1".to_string(),
            s3_endpoint: None,
            s3_prefix: "darkroom".to_string(),
            catalog_backend: CatalogBackend::Memory,
            database_url: None,
            db_max_connections: 10,
            db_timeout_seconds: 30,
            max_upload_size_bytes: 500 * 1024 * 1024,
            jpeg_quality: 75,
            thumbnail_jpeg_quality: 80,
            processed_max_width: 3200,
            processed_max_height: 2400,
            thumbnail_width: 400,
            thumbnail_height: 300,
            watermark_text: "© Darkroom Studio".to_string(),
            watermark_opacity: 0.6,
            watermark_size_divisor: 16,
            watermark_font_path: None,
            default_image_width: 3200,
            default_image_height: 2400,
            publish_timeout_secs: 30,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_jpeg_quality_out_of_range_rejected() {
        let mut config = base_config();
        config.jpeg_quality = 95;
        assert!(config.validate().is_err());
        config.jpeg_quality = 60;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_watermark_opacity_out_of_range_rejected() {
        let mut config = base_config();
        config.watermark_opacity = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_s3_backend_requires_bucket() {
        let mut config = base_config();
        config.storage_backend = StorageBackend::S3;
        assert!(config.validate().is_err());
        config.s3_bucket = Some("photos".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgres_backend_requires_database_url() {
        let mut config = base_config();
        config.catalog_backend = CatalogBackend::Postgres;
        assert!(config.validate().is_err());
        config.database_url = Some("postgresql://localhost/darkroom".to_string());
        assert!(config.validate().is_ok());
        config.database_url = Some("mysql://localhost/darkroom".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let mut config = base_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());
        config.cors_origins = vec!["https://example.com".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!(
            "s3".parse::<StorageBackend>().unwrap(),
            StorageBackend::S3
        );
        assert_eq!(
            "LOCAL".parse::<StorageBackend>().unwrap(),
            StorageBackend::Local
        );
        assert!("gcs".parse::<StorageBackend>().is_err());
        assert_eq!(
            "memory".parse::<CatalogBackend>().unwrap(),
            CatalogBackend::Memory
        );
    }
}
