//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use darkroom_core::models;

/// The OpenAPI spec for the RapiDoc UI and external tooling.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Darkroom API",
        version = "0.1.0",
        description = "Photography portfolio backend. Uploads run through a processing pipeline (orientation fix, bounded resize, watermark, progressive JPEG re-encode, thumbnail) before publication; the catalog then serves listings and streams the published renditions."
    ),
    paths(
        handlers::photo_upload::upload_photo,
        handlers::photo_get::list_photos,
        handlers::photo_get::get_photo,
        handlers::photo_update::update_photo,
        handlers::photo_delete::delete_photo,
        handlers::photo_download::download_photo,
    ),
    components(schemas(
        models::PhotoResponse,
        models::UploadResponse,
        models::UpdatePhotoRequest,
        models::PhotoCategory,
        error::ErrorResponse,
    )),
    tags(
        (name = "photos", description = "Photo upload, catalog management, and delivery")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_contains_photo_paths() {
        let spec = get_openapi_spec();
        let json = serde_json::to_value(&spec).expect("serialize openapi spec");

        let paths = json["paths"].as_object().expect("paths object");
        assert!(paths.contains_key("/api/v0/photos"));
        assert!(paths.contains_key("/api/v0/photos/{id}"));
        assert!(paths.contains_key("/api/v0/photos/{id}/file"));
    }

    #[test]
    fn test_spec_registers_response_schemas() {
        let spec = get_openapi_spec();
        let json = serde_json::to_value(&spec).expect("serialize openapi spec");

        let schemas = json["components"]["schemas"]
            .as_object()
            .expect("schemas object");
        assert!(schemas.contains_key("PhotoResponse"));
        assert!(schemas.contains_key("UploadResponse"));
        assert!(schemas.contains_key("ErrorResponse"));
    }
}
