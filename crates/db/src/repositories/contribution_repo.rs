//! Repository for the `contributions` table.

use sqlx::PgPool;

use clawcollab_core::types::DbId;

use crate::models::actor::Actor;
use crate::models::contribution::{Contribution, ContributionWithVotes, CreateContribution};

const COLUMNS: &str = "id, topic_id, reply_to, content_type, title, content, language, \
    file_url, file_name, author, author_type, created_at";

pub struct ContributionRepo;

impl ContributionRepo {
    pub async fn create(
        pool: &PgPool,
        topic_id: DbId,
        input: &CreateContribution,
        actor: &Actor,
    ) -> Result<Contribution, sqlx::Error> {
        let query = format!(
            "INSERT INTO contributions
                (topic_id, reply_to, content_type, title, content, language,
                 file_url, file_name, author, author_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(topic_id)
            .bind(input.reply_to)
            .bind(input.content_type.as_str())
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.language)
            .bind(&input.file_url)
            .bind(&input.file_name)
            .bind(&actor.name)
            .bind(actor.kind.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contribution>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contributions WHERE id = $1");
        sqlx::query_as::<_, Contribution>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Contributions on a topic, oldest first, with vote tallies.
    pub async fn list_for_topic(
        pool: &PgPool,
        topic_id: DbId,
    ) -> Result<Vec<ContributionWithVotes>, sqlx::Error> {
        sqlx::query_as::<_, ContributionWithVotes>(
            "SELECT c.id, c.topic_id, c.reply_to, c.content_type, c.title, c.content, c.language,
                    c.file_url, c.file_name, c.author, c.author_type, c.created_at,
                    COUNT(v.id) FILTER (WHERE v.direction = 1) AS upvotes,
                    COUNT(v.id) FILTER (WHERE v.direction = -1) AS downvotes,
                    COALESCE(SUM(v.direction), 0)::BIGINT AS score
             FROM contributions c
             LEFT JOIN votes v ON v.subject_type = 'contribution' AND v.subject_id = c.id
             WHERE c.topic_id = $1
             GROUP BY c.id
             ORDER BY c.id",
        )
        .bind(topic_id)
        .fetch_all(pool)
        .await
    }
}
