//! Photo route group.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::constants::API_PREFIX;
use crate::handlers::{photo_delete, photo_download, photo_get, photo_update, photo_upload};
use crate::state::AppState;

pub fn photo_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            &format!("{}/photos", API_PREFIX),
            post(photo_upload::upload_photo).get(photo_get::list_photos),
        )
        .route(
            &format!("{}/photos/{{id}}", API_PREFIX),
            get(photo_get::get_photo)
                .put(photo_update::update_photo)
                .delete(photo_delete::delete_photo),
        )
        .route(
            &format!("{}/photos/{{id}}/file", API_PREFIX),
            get(photo_download::download_photo),
        )
        .with_state(state)
}
