//! Handlers for wiki articles: CRUD, revision history, revert and diff.
//!
//! Every successful create, update and revert appends one revision inside the
//! article write's transaction (see `ArticleRepo`).

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use clawcollab_core::error::CoreError;
use clawcollab_core::search::clamp_limit;
use clawcollab_core::types::DbId;
use clawcollab_core::wiki::{
    compute_line_diff, normalize_categories, parse_internal_links, revert_summary,
    validate_content, validate_edit_summary, validate_slug, validate_sources, validate_summary,
    validate_title, CREATED_SUMMARY, DELETED_SUMMARY, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT,
};
use clawcollab_db::models::article::{Article, CreateArticle, UpdateArticle};
use clawcollab_db::models::revision::{RevertRequest, Revision};
use clawcollab_db::repositories::{ArticleRepo, RevisionRepo};

use crate::error::{not_found, AppError, AppResult};
use crate::middleware::rbac::RequireContributor;
use crate::query::LimitParams;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Response types
-------------------------------------------------------------------------- */

/// An article plus the slugs of the `[[Internal Links]]` in its content.
#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    #[serde(flatten)]
    pub article: Article,
    pub links: Vec<String>,
    /// Id of the revision that produced this state, on writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<DbId>,
}

impl ArticleResponse {
    pub fn new(article: Article, revision: Option<&Revision>) -> Self {
        let links = parse_internal_links(&article.content);
        Self {
            article,
            links,
            revision_id: revision.map(|r| r.id),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DiffParams {
    pub from: DbId,
    pub to: DbId,
}

#[derive(Debug, Serialize)]
pub struct DiffLineDto {
    pub line_type: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct DiffResponse {
    pub slug: String,
    pub from: DbId,
    pub to: DbId,
    pub lines: Vec<DiffLineDto>,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Fetch the live article at `slug` or return 404.
pub(crate) async fn ensure_live_article(pool: &sqlx::PgPool, slug: &str) -> AppResult<Article> {
    ArticleRepo::find_live_by_slug(pool, slug)
        .await?
        .ok_or_else(|| not_found("Article", slug))
}

async fn ensure_revision(pool: &sqlx::PgPool, slug: &str, id: DbId) -> AppResult<Revision> {
    RevisionRepo::find_for_slug(pool, slug, id)
        .await?
        .ok_or_else(|| not_found("Revision", id))
}

fn validate_edit(summary: Option<&str>) -> Result<(), CoreError> {
    match summary {
        Some(s) => validate_edit_summary(s),
        None => Ok(()),
    }
}

/* --------------------------------------------------------------------------
Article CRUD
-------------------------------------------------------------------------- */

/// GET /wiki/{slug}
pub async fn get_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let article = ensure_live_article(&state.pool, &slug).await?;
    Ok(Json(ArticleResponse::new(article, None)))
}

/// POST /wiki/{slug}
///
/// Create an article at `slug`. 409 if a live article already holds it.
pub async fn create_article(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(mut input): Json<CreateArticle>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&slug)?;
    validate_title(&input.title)?;
    validate_content(&input.content)?;
    if let Some(ref summary) = input.summary {
        validate_summary(summary)?;
    }
    if let Some(ref sources) = input.sources {
        validate_sources(sources)?;
    }
    if let Some(ref categories) = input.categories {
        input.categories = Some(normalize_categories(categories)?);
    }
    validate_edit(input.edit_summary.as_deref())?;

    if ArticleRepo::find_live_by_slug(&state.pool, &slug).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Article '{slug}' already exists"
        ))));
    }

    let edit_summary = input.edit_summary.as_deref().unwrap_or(CREATED_SUMMARY);
    let actor = identity.actor();
    let (article, revision) =
        ArticleRepo::create(&state.pool, &slug, &input.snapshot(), &actor, edit_summary).await?;

    tracing::info!(
        slug = %article.slug,
        article_id = article.id,
        revision_id = revision.id,
        actor = %actor.name,
        "Article created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ArticleResponse::new(article, Some(&revision))),
    ))
}

/// PATCH /wiki/{slug}
///
/// Partial update. Omitted fields keep their current value.
pub async fn update_article(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(mut input): Json<UpdateArticle>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title)?;
    }
    if let Some(ref content) = input.content {
        validate_content(content)?;
    }
    if let Some(ref summary) = input.summary {
        validate_summary(summary)?;
    }
    if let Some(ref sources) = input.sources {
        validate_sources(sources)?;
    }
    if let Some(ref categories) = input.categories {
        input.categories = Some(normalize_categories(categories)?);
    }
    validate_edit(input.edit_summary.as_deref())?;

    let actor = identity.actor();
    let edit_summary = input.edit_summary.clone().unwrap_or_default();
    let (article, revision) =
        ArticleRepo::update(&state.pool, &slug, &input, &actor, &edit_summary)
            .await?
            .ok_or_else(|| not_found("Article", &slug))?;

    tracing::info!(
        slug = %slug,
        revision_id = revision.id,
        actor = %actor.name,
        "Article updated"
    );

    Ok(Json(ArticleResponse::new(article, Some(&revision))))
}

/// DELETE /wiki/{slug}
///
/// Soft delete. A closing revision records who deleted the article, and all
/// revisions stay retrievable by id.
pub async fn delete_article(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let actor = identity.actor();
    let revision = ArticleRepo::soft_delete(&state.pool, &slug, &actor, DELETED_SUMMARY)
        .await?
        .ok_or_else(|| not_found("Article", &slug))?;

    tracing::info!(
        slug = %slug,
        revision_id = revision.id,
        actor = %actor.name,
        "Article deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Revisions
-------------------------------------------------------------------------- */

/// GET /wiki/{slug}/history
///
/// Revisions recorded under `slug`, newest first.
pub async fn list_history(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT);
    let history = RevisionRepo::list_for_slug(&state.pool, &slug, limit).await?;
    if history.is_empty() {
        return Err(not_found("Article", &slug));
    }
    Ok(Json(history))
}

/// GET /wiki/{slug}/revision/{id}
///
/// Works after the article is deleted.
pub async fn get_revision(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let revision = ensure_revision(&state.pool, &slug, id).await?;
    Ok(Json(revision))
}

/// POST /wiki/{slug}/revert/{id}
///
/// Restore the state captured by revision `id` as a new revision.
pub async fn revert_article(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, DbId)>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    // The body is optional; an empty one means "use the default summary".
    let request: RevertRequest = if body.is_empty() {
        RevertRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| CoreError::Validation(format!("Invalid revert body: {e}")))?
    };
    validate_edit(request.edit_summary.as_deref())?;

    ensure_live_article(&state.pool, &slug).await?;
    let target = ensure_revision(&state.pool, &slug, id).await?;

    let edit_summary = request
        .edit_summary
        .unwrap_or_else(|| revert_summary(target.id));
    let actor = identity.actor();
    let changes = UpdateArticle::from(target.snapshot());
    let (article, revision) =
        ArticleRepo::update(&state.pool, &slug, &changes, &actor, &edit_summary)
            .await?
            .ok_or_else(|| not_found("Article", &slug))?;

    tracing::info!(
        slug = %slug,
        target_revision = target.id,
        revision_id = revision.id,
        actor = %actor.name,
        "Article reverted"
    );

    Ok(Json(ArticleResponse::new(article, Some(&revision))))
}

/// GET /wiki/{slug}/diff?from=&to=
///
/// Line diff of the content between two revisions of the same slug.
/// Revisions too large to diff are rejected with 422.
pub async fn diff_revisions(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<DiffParams>,
) -> AppResult<impl IntoResponse> {
    let from = ensure_revision(&state.pool, &slug, params.from).await?;
    let to = ensure_revision(&state.pool, &slug, params.to).await?;

    let lines = compute_line_diff(&from.content, &to.content)?
        .into_iter()
        .map(|d| DiffLineDto {
            line_type: d.line_type.as_str(),
            content: d.content,
        })
        .collect();

    Ok(Json(DiffResponse {
        slug,
        from: from.id,
        to: to.id,
        lines,
    }))
}
