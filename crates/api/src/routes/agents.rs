//! Route definitions for the `/agents` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::agents;
use crate::state::AppState;

/// Routes mounted at `/agents`.
///
/// ```text
/// POST /register     -> register_agent (public)
/// POST /quick-claim  -> quick_claim (agent key)
/// GET  /status       -> agent_status (agent key)
/// GET  /me           -> agent_me (agent key)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(agents::register_agent))
        .route("/quick-claim", post(agents::quick_claim))
        .route("/status", get(agents::agent_status))
        .route("/me", get(agents::agent_me))
}
