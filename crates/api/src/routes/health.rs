use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the database answered a trivial query.
    pub db_healthy: bool,
}

/// GET /health -- reports `degraded` rather than failing when the database
/// is unreachable.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = clawcollab_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
