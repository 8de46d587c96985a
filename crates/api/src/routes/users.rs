//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST /register  -> register_user (public)
/// POST /login     -> login (public)
/// GET  /me        -> user_me (user token)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register_user))
        .route("/login", post(users::login))
        .route("/me", get(users::user_me))
}
