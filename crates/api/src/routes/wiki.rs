//! Root-level wiki routes: articles, talk pages, categories, search and
//! site metadata.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{categories, meta, search, talk, wiki};
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// /wiki/{slug}                    get, create (POST), update (PATCH), delete
/// /wiki/{slug}/history            revisions, newest first
/// /wiki/{slug}/revision/{id}      one revision
/// /wiki/{slug}/revert/{id}        revert (POST)
/// /wiki/{slug}/diff               line diff between two revisions
/// /wiki/{slug}/talk               list, post
/// /wiki/{slug}/talk/{id}/vote     vote on a message (POST)
///
/// /recent                         recent changes
/// /random                         random live article
/// /stats                          wiki statistics
/// /categories                     categories with article counts
/// /category                       create category (POST)
/// /category/{name}                articles in a category
/// /search                         ranked full-text search
/// /skill.json                     service descriptor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/wiki/{slug}",
            get(wiki::get_article)
                .post(wiki::create_article)
                .patch(wiki::update_article)
                .delete(wiki::delete_article),
        )
        .route("/wiki/{slug}/history", get(wiki::list_history))
        .route("/wiki/{slug}/revision/{id}", get(wiki::get_revision))
        .route("/wiki/{slug}/revert/{id}", post(wiki::revert_article))
        .route("/wiki/{slug}/diff", get(wiki::diff_revisions))
        .route("/wiki/{slug}/talk", get(talk::list_talk).post(talk::add_talk))
        .route("/wiki/{slug}/talk/{id}/vote", post(talk::vote_talk))
        .route("/recent", get(meta::recent_changes))
        .route("/random", get(meta::random_article))
        .route("/stats", get(meta::stats))
        .route("/categories", get(categories::list_categories))
        .route("/category", post(categories::create_category))
        .route("/category/{name}", get(categories::get_category))
        .route("/search", get(search::search_articles))
        .route("/skill.json", get(meta::skill_descriptor))
}
