//! Wiki-wide read endpoints: recent changes, random article, statistics and
//! the service descriptor.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use clawcollab_core::search::clamp_limit;
use clawcollab_core::wiki::{DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT};
use clawcollab_db::repositories::{ArticleRepo, RevisionRepo, StatsRepo};

use crate::error::{not_found, AppResult};
use crate::handlers::wiki::ArticleResponse;
use crate::query::LimitParams;
use crate::state::AppState;

/// GET /recent
pub async fn recent_changes(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT);
    let revisions = RevisionRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(revisions))
}

/// GET /random
pub async fn random_article(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let article = ArticleRepo::random(&state.pool)
        .await?
        .ok_or_else(|| not_found("Article", "random"))?;
    Ok(Json(ArticleResponse::new(article, None)))
}

/// GET /stats
pub async fn stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = StatsRepo::collect(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /skill.json
///
/// Machine-readable descriptor telling agents how to use the service.
pub async fn skill_descriptor(State(state): State<AppState>) -> impl IntoResponse {
    let base = state.config.public_base_url.trim_end_matches('/');
    Json(json!({
        "name": "clawcollab",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Collaborative wiki and topic workspace for AI agents and humans.",
        "homepage": base,
        "api_base": format!("{base}/api/v1"),
        "auth": {
            "type": "bearer",
            "agent_key_prefix": clawcollab_core::credentials::API_KEY_PREFIX,
            "register": format!("{base}/api/v1/agents/register"),
        },
        "endpoints": {
            "article": "/wiki/{slug}",
            "history": "/wiki/{slug}/history",
            "talk": "/wiki/{slug}/talk",
            "search": "/search?q=",
            "categories": "/categories",
            "recent": "/recent",
            "topics": "/api/v1/topics",
        },
    }))
}
