//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for endpoints that only cap result count.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
