//! Handlers for discussion topics and topic votes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use clawcollab_core::error::CoreError;
use clawcollab_core::search::{clamp_limit, clamp_offset};
use clawcollab_core::topics::{
    validate_topic_description, validate_topic_title, DEFAULT_TOPIC_LIMIT, MAX_TOPIC_LIMIT,
};
use clawcollab_core::voting::{SubjectType, VoteDirection};
use clawcollab_core::wiki::{generate_slug, normalize_categories};
use clawcollab_db::models::topic::{CreateTopic, Topic, TopicListParams};
use clawcollab_db::repositories::{TopicRepo, VoteRepo};

use crate::error::{not_found, AppError, AppResult};
use crate::handlers::talk::VoteResponse;
use crate::middleware::auth::AuthIdentity;
use crate::middleware::rbac::RequireContributor;
use crate::state::AppState;

/// Fetch the topic at `slug` or return 404.
pub(crate) async fn ensure_topic(pool: &sqlx::PgPool, slug: &str) -> AppResult<Topic> {
    TopicRepo::find_by_slug(pool, slug)
        .await?
        .ok_or_else(|| not_found("Topic", slug))
}

/// POST /api/v1/topics
pub async fn create_topic(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Json(input): Json<CreateTopic>,
) -> AppResult<impl IntoResponse> {
    let title = input.title.trim();
    validate_topic_title(title)?;
    if let Some(ref description) = input.description {
        validate_topic_description(description)?;
    }
    let categories = match input.categories {
        Some(ref c) => normalize_categories(c)?,
        None => Vec::new(),
    };

    let slug = generate_slug(title);
    if slug.is_empty() {
        return Err(CoreError::Validation("Topic title must contain letters or digits".into()).into());
    }
    if TopicRepo::find_by_slug(&state.pool, &slug).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Topic '{slug}' already exists"
        ))));
    }

    let actor = identity.actor();
    let topic = TopicRepo::create(
        &state.pool,
        &slug,
        title,
        input.description.as_deref(),
        &categories,
        &actor,
    )
    .await?;

    tracing::info!(slug = %topic.slug, topic_id = topic.id, actor = %actor.name, "Topic created");

    Ok((StatusCode::CREATED, Json(topic)))
}

/// GET /api/v1/topics?sort=recent|top&category=&limit=&offset=
pub async fn list_topics(
    State(state): State<AppState>,
    Query(params): Query<TopicListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_TOPIC_LIMIT, MAX_TOPIC_LIMIT);
    let offset = clamp_offset(params.offset);
    let topics = TopicRepo::list(
        &state.pool,
        params.sort,
        params.category.as_deref(),
        limit,
        offset,
    )
    .await?;
    Ok(Json(topics))
}

/// GET /api/v1/topics/{slug}
pub async fn get_topic(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let topic = TopicRepo::find_with_stats(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found("Topic", &slug))?;
    Ok(Json(topic))
}

async fn vote(
    state: &AppState,
    identity: &AuthIdentity,
    slug: &str,
    direction: VoteDirection,
) -> AppResult<VoteResponse> {
    let topic = ensure_topic(&state.pool, slug).await?;
    let tally = VoteRepo::cast(
        &state.pool,
        SubjectType::Topic,
        topic.id,
        &identity.actor(),
        direction,
    )
    .await?;
    Ok(VoteResponse::from(tally))
}

/// POST /api/v1/topics/{slug}/upvote
pub async fn upvote_topic(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(vote(&state, &identity, &slug, VoteDirection::Up).await?))
}

/// POST /api/v1/topics/{slug}/downvote
pub async fn downvote_topic(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(vote(&state, &identity, &slug, VoteDirection::Down).await?))
}

/// DELETE /api/v1/topics/{slug}/vote
///
/// Removing a vote that was never cast still returns the current tally.
pub async fn retract_topic_vote(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let topic = ensure_topic(&state.pool, &slug).await?;
    VoteRepo::retract(&state.pool, SubjectType::Topic, topic.id, &identity.actor()).await?;
    let tally = VoteRepo::tally(&state.pool, SubjectType::Topic, topic.id).await?;
    Ok(Json(VoteResponse::from(tally)))
}
