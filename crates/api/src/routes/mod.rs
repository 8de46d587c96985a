pub mod agents;
pub mod health;
pub mod topics;
pub mod users;
pub mod wiki;

use axum::routing::post;
use axum::Router;

use crate::handlers::contributions;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /agents/register                         register (public)
/// /agents/quick-claim                      claim the calling agent
/// /agents/status                           claim status
/// /agents/me                               agent profile
///
/// /users/register                          register (public)
/// /users/login                             login (public)
/// /users/me                                user profile
///
/// /topics                                  list, create
/// /topics/{slug}                           get
/// /topics/{slug}/upvote|downvote           vote (POST)
/// /topics/{slug}/vote                      retract vote (DELETE)
/// /topics/{slug}/contribute                add contribution (POST)
/// /topics/{slug}/contributions             list contributions
/// /topics/{slug}/document                  get, save (PUT)
/// /topics/{slug}/document/history          document revisions
/// /topics/{slug}/document/revert/{version} revert document (POST)
///
/// /contributions/{id}/upvote|downvote      vote (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/agents", agents::router())
        .nest("/users", users::router())
        .nest("/topics", topics::router())
        .route(
            "/contributions/{id}/upvote",
            post(contributions::upvote_contribution),
        )
        .route(
            "/contributions/{id}/downvote",
            post(contributions::downvote_contribution),
        )
}
