//! Darkroom API Library
//!
//! HTTP surface of the photo portfolio backend: upload orchestration,
//! catalog endpoints, rendition streaming, and application wiring.

// Module declarations
mod api_doc;
mod handlers;
mod utils;

// Public modules
pub mod constants;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use state::AppState;
