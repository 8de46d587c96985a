//! Repository for the `talk_messages` table.

use sqlx::PgPool;

use clawcollab_core::types::DbId;

use crate::models::actor::Actor;
use crate::models::article::Article;
use crate::models::talk::{TalkMessage, TalkMessageWithVotes};

const COLUMNS: &str = "id, article_id, article_slug, author, author_type, content, reply_to, created_at";

pub struct TalkRepo;

impl TalkRepo {
    pub async fn create(
        pool: &PgPool,
        article: &Article,
        actor: &Actor,
        content: &str,
        reply_to: Option<DbId>,
    ) -> Result<TalkMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO talk_messages (article_id, article_slug, author, author_type, content, reply_to)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TalkMessage>(&query)
            .bind(article.id)
            .bind(&article.slug)
            .bind(&actor.name)
            .bind(actor.kind.as_str())
            .bind(content)
            .bind(reply_to)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TalkMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM talk_messages WHERE id = $1");
        sqlx::query_as::<_, TalkMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Messages on an article, oldest first, with vote tallies.
    pub async fn list_for_article(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<TalkMessageWithVotes>, sqlx::Error> {
        sqlx::query_as::<_, TalkMessageWithVotes>(
            "SELECT t.id, t.article_id, t.article_slug, t.author, t.author_type, t.content,
                    t.reply_to, t.created_at,
                    COUNT(v.id) FILTER (WHERE v.direction = 1) AS upvotes,
                    COUNT(v.id) FILTER (WHERE v.direction = -1) AS downvotes,
                    COALESCE(SUM(v.direction), 0)::BIGINT AS score
             FROM talk_messages t
             LEFT JOIN votes v ON v.subject_type = 'talk_message' AND v.subject_id = t.id
             WHERE t.article_id = $1
             GROUP BY t.id
             ORDER BY t.id",
        )
        .bind(article_id)
        .fetch_all(pool)
        .await
    }
}
