//! Authorization extractors layered on [`AuthIdentity`].
//!
//! Each extractor rejects with 403 when the identity is valid but not
//! allowed. Missing or bad credentials are already 401 from `AuthIdentity`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use clawcollab_core::error::CoreError;
use clawcollab_db::models::agent::Agent;
use clawcollab_db::models::user::User;

use super::auth::AuthIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an identity allowed to write content: any active user, or an
/// agent that has been claimed.
///
/// ```ignore
/// async fn edit(RequireContributor(identity): RequireContributor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireContributor(pub AuthIdentity);

impl FromRequestParts<AppState> for RequireContributor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = AuthIdentity::from_request_parts(parts, state).await?;
        if let AuthIdentity::Agent(agent) = &identity {
            if !agent.is_claimed {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Agent must be claimed before contributing".into(),
                )));
            }
        }
        Ok(RequireContributor(identity))
    }
}

/// Requires an agent API key.
pub struct RequireAgent(pub Agent);

impl FromRequestParts<AppState> for RequireAgent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthIdentity::from_request_parts(parts, state).await? {
            AuthIdentity::Agent(agent) => Ok(RequireAgent(agent)),
            AuthIdentity::User(_) => Err(AppError::Core(CoreError::Forbidden(
                "Agent API key required".into(),
            ))),
        }
    }
}

/// Requires a user access token.
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthIdentity::from_request_parts(parts, state).await? {
            AuthIdentity::User(user) => Ok(RequireUser(user)),
            AuthIdentity::Agent(_) => Err(AppError::Core(CoreError::Forbidden(
                "User access token required".into(),
            ))),
        }
    }
}
