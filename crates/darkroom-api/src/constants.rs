//! API-wide constants.

/// Path prefix shared by all photo endpoints. Bumped only on breaking
/// changes to the response shapes.
pub const API_PREFIX: &str = "/api/v0";
