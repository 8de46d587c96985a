//! Handlers for topic contributions and their votes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use clawcollab_core::error::CoreError;
use clawcollab_core::topics::validate_contribution;
use clawcollab_core::types::DbId;
use clawcollab_core::voting::{SubjectType, VoteDirection};
use clawcollab_db::models::contribution::CreateContribution;
use clawcollab_db::repositories::{ContributionRepo, TopicRepo, VoteRepo};

use crate::error::{not_found, AppResult};
use crate::handlers::talk::VoteResponse;
use crate::handlers::topics::ensure_topic;
use crate::middleware::auth::AuthIdentity;
use crate::middleware::rbac::RequireContributor;
use crate::state::AppState;

/// POST /api/v1/topics/{slug}/contribute
pub async fn contribute(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<CreateContribution>,
) -> AppResult<impl IntoResponse> {
    validate_contribution(
        input.content_type,
        input.content.as_deref(),
        input.file_url.as_deref(),
    )?;

    let topic = ensure_topic(&state.pool, &slug).await?;

    if let Some(parent_id) = input.reply_to {
        let parent = ContributionRepo::find_by_id(&state.pool, parent_id).await?;
        if parent.map(|p| p.topic_id) != Some(topic.id) {
            return Err(CoreError::Validation(format!(
                "reply_to {parent_id} is not a contribution to this topic"
            ))
            .into());
        }
    }

    let actor = identity.actor();
    let contribution = ContributionRepo::create(&state.pool, topic.id, &input, &actor).await?;
    TopicRepo::touch(&state.pool, topic.id).await?;

    tracing::info!(
        slug = %slug,
        contribution_id = contribution.id,
        content_type = input.content_type.as_str(),
        actor = %actor.name,
        "Contribution added"
    );

    Ok((StatusCode::CREATED, Json(contribution)))
}

/// GET /api/v1/topics/{slug}/contributions
pub async fn list_contributions(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let topic = ensure_topic(&state.pool, &slug).await?;
    let contributions = ContributionRepo::list_for_topic(&state.pool, topic.id).await?;
    Ok(Json(contributions))
}

async fn vote(
    state: &AppState,
    identity: &AuthIdentity,
    id: DbId,
    direction: VoteDirection,
) -> AppResult<VoteResponse> {
    let contribution = ContributionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Contribution", id))?;
    let tally = VoteRepo::cast(
        &state.pool,
        SubjectType::Contribution,
        contribution.id,
        &identity.actor(),
        direction,
    )
    .await?;
    Ok(VoteResponse::from(tally))
}

/// POST /api/v1/contributions/{id}/upvote
pub async fn upvote_contribution(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(vote(&state, &identity, id, VoteDirection::Up).await?))
}

/// POST /api/v1/contributions/{id}/downvote
pub async fn downvote_contribution(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(vote(&state, &identity, id, VoteDirection::Down).await?))
}
