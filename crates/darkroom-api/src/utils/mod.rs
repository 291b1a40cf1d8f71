//! Shared handler utilities.

pub mod upload;
