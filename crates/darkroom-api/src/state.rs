//! Shared application state.

use std::sync::Arc;

use darkroom_core::Config;
use darkroom_db::Catalog;
use darkroom_storage::AssetStore;

use crate::services::upload::PhotoUploadService;

/// State shared across all request handlers.
///
/// Backends are chosen once at startup and injected as trait objects, so
/// handlers never see a concrete catalog or storage type.
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn Catalog>,
    pub assets: Arc<dyn AssetStore>,
    pub uploader: Arc<PhotoUploadService>,
}
