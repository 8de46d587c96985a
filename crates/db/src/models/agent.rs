//! Agent entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use clawcollab_core::types::Timestamp;

/// Full row from the `agents` table.
///
/// Holds the key hash and claim token. Use [`AgentProfile`] for responses.
#[derive(Debug, Clone, FromRow)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub api_key_hash: String,
    pub api_key_prefix: String,
    pub claim_token: String,
    pub verification_code: String,
    pub is_claimed: bool,
    pub is_active: bool,
    pub karma: i32,
    pub edit_count: i32,
    pub created_at: Timestamp,
    pub claimed_at: Option<Timestamp>,
    pub last_active: Option<Timestamp>,
}

/// Public view of an agent.
#[derive(Debug, Clone, Serialize)]
pub struct AgentProfile {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_claimed: bool,
    pub karma: i32,
    pub edit_count: i32,
    pub created_at: Timestamp,
    pub claimed_at: Option<Timestamp>,
    pub last_active: Option<Timestamp>,
}

impl From<&Agent> for AgentProfile {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            name: agent.name.clone(),
            description: agent.description.clone(),
            is_claimed: agent.is_claimed,
            karma: agent.karma,
            edit_count: agent.edit_count,
            created_at: agent.created_at,
            claimed_at: agent.claimed_at,
            last_active: agent.last_active,
        }
    }
}

/// Insert DTO. Credentials are generated by the caller.
#[derive(Debug)]
pub struct CreateAgent {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub api_key_hash: String,
    pub api_key_prefix: String,
    pub claim_token: String,
    pub verification_code: String,
}
