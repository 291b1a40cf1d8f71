//! Backend construction and application state assembly.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use darkroom_core::Config;
use darkroom_db::{create_catalog, Catalog};
use darkroom_processing::{
    PipelineConfig, UploadValidator, VariantGenerator, WatermarkConfig, WatermarkRenderer,
};
use darkroom_storage::{create_asset_store, AssetStore};

use crate::services::upload::PhotoUploadService;
use crate::state::AppState;

/// Build the configured catalog and storage backends, then assemble the
/// shared application state.
pub async fn initialize_services(config: Config) -> Result<Arc<AppState>> {
    let config = Arc::new(config);

    let catalog = create_catalog(&config).await?;
    let assets = create_asset_store(&config).await?;

    Ok(build_state(config, catalog, assets))
}

/// Wire the processing pipeline and upload service around the given
/// backends. Tests inject the in-memory catalog and a tempdir store here.
pub fn build_state(
    config: Arc<Config>,
    catalog: Arc<dyn Catalog>,
    assets: Arc<dyn AssetStore>,
) -> Arc<AppState> {
    let watermark = WatermarkRenderer::from_config(WatermarkConfig {
        text: config.watermark_text.clone(),
        opacity: config.watermark_opacity,
        size_divisor: config.watermark_size_divisor,
        font_path: config.watermark_font_path.as_ref().map(PathBuf::from),
    });
    if !watermark.is_enabled() {
        tracing::warn!("No watermark font configured; photos will publish unwatermarked");
    }

    let pipeline = PipelineConfig {
        processed_max_width: config.processed_max_width,
        processed_max_height: config.processed_max_height,
        jpeg_quality: config.jpeg_quality,
        thumbnail_width: config.thumbnail_width,
        thumbnail_height: config.thumbnail_height,
        thumbnail_jpeg_quality: config.thumbnail_jpeg_quality,
        default_width: config.default_image_width,
        default_height: config.default_image_height,
    };

    let uploader = Arc::new(PhotoUploadService::new(
        config.clone(),
        catalog.clone(),
        assets.clone(),
        UploadValidator::new(config.max_upload_size_bytes),
        Arc::new(VariantGenerator::new(pipeline, watermark)),
    ));

    Arc::new(AppState {
        config,
        catalog,
        assets,
        uploader,
    })
}
