//! Handlers for a topic's collaborative block document.
//!
//! Every save, including a revert, produces a new version and appends one
//! `DocumentRevision`.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use clawcollab_core::topics::validate_blocks;
use clawcollab_core::wiki::validate_edit_summary;
use clawcollab_db::models::document::SaveDocument;
use clawcollab_db::repositories::{DocumentRepo, TopicRepo};

use crate::error::{not_found, AppResult};
use crate::handlers::topics::ensure_topic;
use crate::middleware::rbac::RequireContributor;
use crate::state::AppState;

const DOCUMENT_SAVED: &str = "Document updated";

/// GET /api/v1/topics/{slug}/document
pub async fn get_document(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let topic = ensure_topic(&state.pool, &slug).await?;
    let document = DocumentRepo::find_by_topic(&state.pool, topic.id)
        .await?
        .ok_or_else(|| not_found("Document", &slug))?;
    Ok(Json(document))
}

/// PUT /api/v1/topics/{slug}/document
///
/// Replaces the whole block list.
pub async fn save_document(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<SaveDocument>,
) -> AppResult<impl IntoResponse> {
    validate_blocks(&input.blocks)?;
    if let Some(ref summary) = input.edit_summary {
        validate_edit_summary(summary)?;
    }

    let topic = ensure_topic(&state.pool, &slug).await?;
    let actor = identity.actor();
    let edit_summary = input.edit_summary.as_deref().unwrap_or(DOCUMENT_SAVED);
    let (document, revision) =
        DocumentRepo::save(&state.pool, topic.id, &input.blocks, &actor, edit_summary).await?;
    TopicRepo::touch(&state.pool, topic.id).await?;

    tracing::info!(
        slug = %slug,
        version = revision.version,
        blocks = input.blocks.len(),
        actor = %actor.name,
        "Document saved"
    );

    Ok(Json(document))
}

/// GET /api/v1/topics/{slug}/document/history
///
/// Newest version first.
pub async fn document_history(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let topic = ensure_topic(&state.pool, &slug).await?;
    let revisions = DocumentRepo::list_revisions(&state.pool, topic.id).await?;
    Ok(Json(revisions))
}

/// POST /api/v1/topics/{slug}/document/revert/{version}
pub async fn revert_document(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path((slug, version)): Path<(String, i32)>,
) -> AppResult<impl IntoResponse> {
    let topic = ensure_topic(&state.pool, &slug).await?;
    let target = DocumentRepo::find_revision(&state.pool, topic.id, version)
        .await?
        .ok_or_else(|| not_found("Document version", version))?;

    let actor = identity.actor();
    let edit_summary = format!("Reverted to version {version}");
    let (document, revision) =
        DocumentRepo::save(&state.pool, topic.id, &target.blocks.0, &actor, &edit_summary).await?;
    TopicRepo::touch(&state.pool, topic.id).await?;

    tracing::info!(
        slug = %slug,
        target_version = version,
        version = revision.version,
        actor = %actor.name,
        "Document reverted"
    );

    Ok(Json(document))
}
