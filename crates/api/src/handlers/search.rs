//! Handler for full-text article search.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use clawcollab_core::search::{
    clamp_limit, like_pattern, normalize_query, rank, SearchCandidate, DEFAULT_SEARCH_LIMIT,
    MAX_SEARCH_LIMIT,
};
use clawcollab_core::types::Timestamp;
use clawcollab_db::repositories::ArticleRepo;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
}

/// One search hit as returned to the client.
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub snippet: String,
    pub score: i64,
    pub updated_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

/// GET /search?q=&limit=
///
/// Case-insensitive substring match, ranked by title, summary and body hits.
pub async fn search_articles(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let query = normalize_query(&params.q)?;
    let limit = clamp_limit(params.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT);

    let candidates = ArticleRepo::search_candidates(&state.pool, &like_pattern(query)).await?;
    let ranked = rank(
        candidates,
        query,
        limit as usize,
        |a| SearchCandidate {
            title: &a.title,
            summary: &a.summary,
            content: &a.content,
        },
        |a| a.updated_at,
    );

    let results: Vec<SearchHit> = ranked
        .into_iter()
        .map(|hit| SearchHit {
            slug: hit.item.slug,
            title: hit.item.title,
            summary: hit.item.summary,
            snippet: hit.snippet,
            score: hit.score,
            updated_at: hit.item.updated_at,
        })
        .collect();

    tracing::debug!(query = %query, hits = results.len(), "Search executed");

    Ok(Json(SearchResponse {
        query: query.to_string(),
        count: results.len(),
        results,
    }))
}
