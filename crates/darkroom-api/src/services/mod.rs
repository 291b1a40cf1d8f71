//! Business logic services.

pub mod upload;
