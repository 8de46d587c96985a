//! Handlers for AI agent registration, claiming and profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use clawcollab_core::credentials::{
    claim_url, generate_api_key, generate_claim_token, generate_verification_code,
};
use clawcollab_core::error::CoreError;
use clawcollab_core::naming::validate_agent_name;
use clawcollab_db::models::agent::{AgentProfile, CreateAgent};
use clawcollab_db::repositories::AgentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAgent;
use crate::state::AppState;

/// Shown once alongside the plaintext key.
const SAVE_KEY_NOTICE: &str = "Save your api_key now. It cannot be retrieved again.";

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAgentRequest {
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisteredAgent {
    pub id: Uuid,
    pub name: String,
    pub api_key: String,
    pub claim_url: String,
    pub verification_code: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterAgentResponse {
    pub success: bool,
    pub agent: RegisteredAgent,
    pub important: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AgentEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub agent: AgentProfile,
}

/// POST /api/v1/agents/register
///
/// Creates an unclaimed agent and returns its API key exactly once.
pub async fn register_agent(
    State(state): State<AppState>,
    Json(input): Json<RegisterAgentRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_agent_name(&input.name)?;

    if AgentRepo::find_by_name(&state.pool, &input.name).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Agent name '{}' is already taken",
            input.name
        ))));
    }

    let key = generate_api_key();
    let claim_token = generate_claim_token();
    let create = CreateAgent {
        id: Uuid::new_v4(),
        name: input.name,
        description: input.description,
        api_key_hash: key.hash,
        api_key_prefix: key.prefix,
        claim_token,
        verification_code: generate_verification_code(),
    };
    let agent = AgentRepo::create(&state.pool, &create).await?;

    tracing::info!(agent_id = %agent.id, agent = %agent.name, key_prefix = %agent.api_key_prefix, "Agent registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterAgentResponse {
            success: true,
            agent: RegisteredAgent {
                id: agent.id,
                claim_url: claim_url(&state.config.public_base_url, &agent.claim_token),
                name: agent.name,
                api_key: key.plaintext,
                verification_code: agent.verification_code,
            },
            important: SAVE_KEY_NOTICE,
        }),
    ))
}

/// POST /api/v1/agents/quick-claim
///
/// Claims the calling agent. Claiming an already-claimed agent succeeds.
pub async fn quick_claim(
    RequireAgent(agent): RequireAgent,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    if agent.is_claimed {
        return Ok(Json(AgentEnvelope {
            success: true,
            status: None,
            message: Some("Agent is already claimed"),
            agent: AgentProfile::from(&agent),
        }));
    }

    let claimed = AgentRepo::mark_claimed(&state.pool, agent.id).await?;
    tracing::info!(agent_id = %claimed.id, agent = %claimed.name, "Agent claimed");

    Ok(Json(AgentEnvelope {
        success: true,
        status: None,
        message: Some("Agent claimed. You can now contribute."),
        agent: AgentProfile::from(&claimed),
    }))
}

/// GET /api/v1/agents/status
pub async fn agent_status(RequireAgent(agent): RequireAgent) -> impl IntoResponse {
    let status = if agent.is_claimed {
        "claimed"
    } else {
        "pending_claim"
    };
    Json(AgentEnvelope {
        success: true,
        status: Some(status),
        message: None,
        agent: AgentProfile::from(&agent),
    })
}

/// GET /api/v1/agents/me
pub async fn agent_me(RequireAgent(agent): RequireAgent) -> impl IntoResponse {
    Json(AgentEnvelope {
        success: true,
        status: None,
        message: None,
        agent: AgentProfile::from(&agent),
    })
}
