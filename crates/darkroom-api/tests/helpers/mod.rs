//! Test helpers: run the full router against the in-memory catalog and a
//! tempdir-backed local asset store. No database, no network.

pub mod fixtures;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum_test::TestServer;
use darkroom_api::constants::API_PREFIX;
use darkroom_api::setup::routes::setup_routes;
use darkroom_api::setup::services::build_state;
use darkroom_core::{CatalogBackend, Config, StorageBackend};
use darkroom_db::{Catalog, MemoryCatalog};
use darkroom_storage::{AssetStore, LocalAssetStore};
use tempfile::TempDir;

/// Prefix a path with the versioned API root.
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// A running test application plus handles on its backends.
pub struct TestApp {
    pub server: TestServer,
    pub catalog: Arc<dyn Catalog>,
    pub storage_root: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Regular files under the storage root; directories do not count.
    pub fn published_file_count(&self) -> usize {
        count_files(&self.storage_root)
    }

    /// Names of the direct children of a storage directory, sorted.
    pub fn storage_dir_entries(&self, relative: &str) -> Vec<String> {
        let dir = if relative.is_empty() {
            self.storage_root.clone()
        } else {
            self.storage_root.join(relative)
        };
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

fn count_files(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                count_files(&path)
            } else {
                1
            }
        })
        .sum()
}

/// Set up a test app with the default configuration.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Set up a test app, letting the caller tweak the configuration first.
pub async fn setup_test_app_with(customize: impl FnOnce(&mut Config)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage_root = temp_dir.path().join("assets");

    let mut config = create_test_config(&storage_root);
    customize(&mut config);

    let catalog: Arc<dyn Catalog> = Arc::new(MemoryCatalog::new());
    let assets: Arc<dyn AssetStore> = Arc::new(
        LocalAssetStore::new(storage_root.clone(), config.public_base_url.clone())
            .await
            .expect("Failed to create local asset store"),
    );

    let state = build_state(Arc::new(config), catalog.clone(), assets);
    let server = TestServer::new(setup_routes(state)).expect("Failed to create test server");

    TestApp {
        server,
        catalog,
        storage_root,
        _temp_dir: temp_dir,
    }
}

fn create_test_config(storage_root: &Path) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 8080,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        storage_backend: StorageBackend::Local,
        local_storage_path: storage_root.display().to_string(),
        public_base_url: "http://localhost:8080".to_string(),
        s3_bucket: None,
        s3_region: "us-east-1".to_string(),
        s3_endpoint: None,
        s3_prefix: "darkroom".to_string(),
        catalog_backend: CatalogBackend::Memory,
        database_url: None,
        db_max_connections: 5,
        db_timeout_seconds: 30,
        max_upload_size_bytes: 32 * 1024 * 1024,
        jpeg_quality: 85,
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
