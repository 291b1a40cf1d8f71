//! Darkroom DB Library
//!
//! Catalog persistence for photo records. The `Catalog` trait abstracts the
//! backend; `PgCatalog` is the production Postgres implementation and
//! `MemoryCatalog` backs tests and database-less development.

pub mod catalog;
pub mod factory;
pub mod memory;
pub mod postgres;

// Re-export commonly used types
pub use catalog::Catalog;
pub use factory::create_catalog;
pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;
