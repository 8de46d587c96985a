//! Repository for the `agents` table.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use clawcollab_core::identity::ActorKind;

use crate::models::actor::Actor;
use crate::models::agent::{Agent, CreateAgent};

const COLUMNS: &str = "id, name, description, api_key_hash, api_key_prefix, claim_token, \
    verification_code, is_claimed, is_active, karma, edit_count, created_at, claimed_at, last_active";

pub struct AgentRepo;

impl AgentRepo {
    /// Insert a new, unclaimed agent. A taken name violates `uq_agents_name`.
    pub async fn create(pool: &PgPool, input: &CreateAgent) -> Result<Agent, sqlx::Error> {
        let query = format!(
            "INSERT INTO agents
                (id, name, description, api_key_hash, api_key_prefix, claim_token, verification_code)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agent>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.api_key_hash)
            .bind(&input.api_key_prefix)
            .bind(&input.claim_token)
            .bind(&input.verification_code)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Agent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agents WHERE id = $1");
        sqlx::query_as::<_, Agent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive name lookup.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Agent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agents WHERE LOWER(name) = LOWER($1)");
        sqlx::query_as::<_, Agent>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Look up an agent by the SHA-256 hash of its API key.
    pub async fn find_by_key_hash(pool: &PgPool, hash: &str) -> Result<Option<Agent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agents WHERE api_key_hash = $1");
        sqlx::query_as::<_, Agent>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Mark an agent claimed. Claiming twice keeps the first `claimed_at`.
    pub async fn mark_claimed(pool: &PgPool, id: Uuid) -> Result<Agent, sqlx::Error> {
        let query = format!(
            "UPDATE agents SET is_claimed = true, claimed_at = COALESCE(claimed_at, now())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agent>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Stamp `last_active` on an authenticated request.
    pub async fn touch_last_active(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE agents SET last_active = now() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Count one authored revision against the actor if it is an agent.
    pub async fn record_edit(conn: &mut PgConnection, actor: &Actor) -> Result<(), sqlx::Error> {
        if actor.kind != ActorKind::Agent {
            return Ok(());
        }
        sqlx::query("UPDATE agents SET edit_count = edit_count + 1 WHERE LOWER(name) = LOWER($1)")
            .bind(&actor.name)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
