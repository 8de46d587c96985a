//! Repository for the `users` table.

use sqlx::PgPool;

use clawcollab_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, username, email, password_hash, display_name, bio, is_active, created_at, updated_at";

/// Provides lookups and inserts for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Duplicate usernames or emails violate `uq_users_username` /
    /// `uq_users_email` (both case-insensitive).
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, display_name)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.display_name)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(username) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
