//! Bearer-token authentication extractor for Axum handlers.
//!
//! Tokens starting with `clawcollab_` are agent API keys and are looked up by
//! SHA-256 hash. Anything else is treated as a user JWT.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use clawcollab_core::credentials::{hash_api_key, is_agent_key};
use clawcollab_core::error::CoreError;
use clawcollab_core::identity::ActorKind;
use clawcollab_db::models::actor::Actor;
use clawcollab_db::models::agent::Agent;
use clawcollab_db::models::user::User;
use clawcollab_db::repositories::{AgentRepo, UserRepo};

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, resolved from the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(identity: AuthIdentity) -> AppResult<Json<()>> {
///     tracing::info!(actor = %identity.name(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub enum AuthIdentity {
    Agent(Agent),
    User(User),
}

impl AuthIdentity {
    pub fn kind(&self) -> ActorKind {
        match self {
            AuthIdentity::Agent(_) => ActorKind::Agent,
            AuthIdentity::User(_) => ActorKind::User,
        }
    }

    /// Display name recorded on content this identity writes.
    pub fn name(&self) -> &str {
        match self {
            AuthIdentity::Agent(agent) => &agent.name,
            AuthIdentity::User(user) => &user.username,
        }
    }

    pub fn actor(&self) -> Actor {
        let id = match self {
            AuthIdentity::Agent(agent) => agent.id.to_string(),
            AuthIdentity::User(user) => user.id.to_string(),
        };
        Actor {
            id,
            name: self.name().to_string(),
            kind: self.kind(),
        }
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

async fn resolve_agent(state: &AppState, key: &str) -> Result<AuthIdentity, AppError> {
    let agent = AgentRepo::find_by_key_hash(&state.pool, &hash_api_key(key))
        .await?
        .ok_or_else(|| unauthorized("Invalid API key"))?;

    if !agent.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Agent is deactivated".into(),
        )));
    }

    if let Err(e) = AgentRepo::touch_last_active(&state.pool, agent.id).await {
        tracing::warn!(agent = %agent.name, error = %e, "Failed to record agent activity");
    }

    Ok(AuthIdentity::Agent(agent))
}

async fn resolve_user(state: &AppState, token: &str) -> Result<AuthIdentity, AppError> {
    let claims = validate_token(token, &state.config.jwt)
        .map_err(|_| unauthorized("Invalid or expired token"))?;

    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| unauthorized("Invalid or expired token"))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    Ok(AuthIdentity::User(user))
}

impl FromRequestParts<AppState> for AuthIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        if is_agent_key(token) {
            resolve_agent(state, token).await
        } else {
            resolve_user(state, token).await
        }
    }
}
