//! Handlers for article talk pages and talk message votes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use clawcollab_core::error::CoreError;
use clawcollab_core::types::DbId;
use clawcollab_core::voting::{SubjectType, VoteDirection, VoteTally};
use clawcollab_db::models::talk::CreateTalkMessage;
use clawcollab_db::models::vote::CastVote;
use clawcollab_db::repositories::{TalkRepo, VoteRepo};

use crate::error::{not_found, AppResult};
use crate::handlers::wiki::ensure_live_article;
use crate::middleware::rbac::RequireContributor;
use crate::state::AppState;

/// Maximum length of a single talk message, in characters.
const MAX_TALK_LENGTH: usize = 10_000;

/// `{success, upvotes, downvotes, score}` returned by every vote route.
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub success: bool,
    #[serde(flatten)]
    pub tally: VoteTally,
}

impl From<VoteTally> for VoteResponse {
    fn from(tally: VoteTally) -> Self {
        Self {
            success: true,
            tally,
        }
    }
}

/// GET /wiki/{slug}/talk
///
/// Messages oldest first, each with its vote tally.
pub async fn list_talk(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let article = ensure_live_article(&state.pool, &slug).await?;
    let messages = TalkRepo::list_for_article(&state.pool, article.id).await?;
    Ok(Json(messages))
}

/// POST /wiki/{slug}/talk
///
/// `reply_to`, when given, must be a message on the same article.
pub async fn add_talk(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<CreateTalkMessage>,
) -> AppResult<impl IntoResponse> {
    let content = input.content.trim();
    if content.is_empty() {
        return Err(CoreError::Validation("Message must not be empty".into()).into());
    }
    if content.chars().count() > MAX_TALK_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message must be at most {MAX_TALK_LENGTH} characters"
        ))
        .into());
    }

    let article = ensure_live_article(&state.pool, &slug).await?;

    if let Some(parent_id) = input.reply_to {
        let parent = TalkRepo::find_by_id(&state.pool, parent_id).await?;
        if parent.map(|p| p.article_id) != Some(article.id) {
            return Err(CoreError::Validation(format!(
                "reply_to {parent_id} is not a message on this article"
            ))
            .into());
        }
    }

    let actor = identity.actor();
    let message = TalkRepo::create(&state.pool, &article, &actor, content, input.reply_to).await?;

    tracing::info!(
        slug = %slug,
        message_id = message.id,
        actor = %actor.name,
        "Talk message posted"
    );

    Ok((StatusCode::CREATED, Json(message)))
}

/// POST /wiki/{slug}/talk/{id}/vote
///
/// Only messages on the current live article at `slug` can be voted on.
pub async fn vote_talk(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, DbId)>,
    Json(input): Json<CastVote>,
) -> AppResult<impl IntoResponse> {
    let direction = VoteDirection::try_from(input.vote)?;

    let article = ensure_live_article(&state.pool, &slug).await?;
    let message = TalkRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|m| m.article_id == article.id)
        .ok_or_else(|| not_found("Talk message", id))?;

    let tally = VoteRepo::cast(
        &state.pool,
        SubjectType::TalkMessage,
        message.id,
        &identity.actor(),
        direction,
    )
    .await?;

    Ok(Json(VoteResponse::from(tally)))
}
