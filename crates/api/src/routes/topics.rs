//! Route definitions for the `/topics` resource and its contributions and
//! document.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{contributions, documents, topics};
use crate::state::AppState;

/// Routes mounted at `/topics`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(topics::list_topics).post(topics::create_topic))
        .route("/{slug}", get(topics::get_topic))
        .route("/{slug}/upvote", post(topics::upvote_topic))
        .route("/{slug}/downvote", post(topics::downvote_topic))
        .route("/{slug}/vote", delete(topics::retract_topic_vote))
        .route("/{slug}/contribute", post(contributions::contribute))
        .route("/{slug}/contributions", get(contributions::list_contributions))
        .route(
            "/{slug}/document",
            get(documents::get_document).put(documents::save_document),
        )
        .route("/{slug}/document/history", get(documents::document_history))
        .route(
            "/{slug}/document/revert/{version}",
            post(documents::revert_document),
        )
}
