//! Repository for the `topics` table.

use sqlx::PgPool;

use clawcollab_core::topics::TopicSort;
use clawcollab_core::types::DbId;

use crate::models::actor::Actor;
use crate::models::topic::{Topic, TopicWithStats};

const COLUMNS: &str = "id, slug, title, description, categories, created_by, created_by_type, \
    created_at, updated_at";

/// Topic columns plus aggregated votes and contribution count, selected
/// from `topics t`.
const STATS_SELECT: &str = "SELECT t.id, t.slug, t.title, t.description, t.categories,
        t.created_by, t.created_by_type, t.created_at, t.updated_at,
        COALESCE(v.upvotes, 0) AS upvotes,
        COALESCE(v.downvotes, 0) AS downvotes,
        COALESCE(v.upvotes, 0) - COALESCE(v.downvotes, 0) AS score,
        (SELECT COUNT(*) FROM contributions c WHERE c.topic_id = t.id) AS contribution_count
     FROM topics t
     LEFT JOIN (
        SELECT subject_id,
               COUNT(*) FILTER (WHERE direction = 1) AS upvotes,
               COUNT(*) FILTER (WHERE direction = -1) AS downvotes
        FROM votes
        WHERE subject_type = 'topic'
        GROUP BY subject_id
     ) v ON v.subject_id = t.id";

pub struct TopicRepo;

impl TopicRepo {
    /// Insert a topic. A duplicate slug violates `uq_topics_slug`.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        title: &str,
        description: Option<&str>,
        categories: &[String],
        actor: &Actor,
    ) -> Result<Topic, sqlx::Error> {
        let query = format!(
            "INSERT INTO topics (slug, title, description, categories, created_by, created_by_type)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Topic>(&query)
            .bind(slug)
            .bind(title)
            .bind(description)
            .bind(categories)
            .bind(&actor.name)
            .bind(actor.kind.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Topic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topics WHERE slug = $1");
        sqlx::query_as::<_, Topic>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_with_stats(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<TopicWithStats>, sqlx::Error> {
        let query = format!("{STATS_SELECT} WHERE t.slug = $1");
        sqlx::query_as::<_, TopicWithStats>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List topics, optionally filtered to one category.
    pub async fn list(
        pool: &PgPool,
        sort: TopicSort,
        category: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TopicWithStats>, sqlx::Error> {
        let order = match sort {
            TopicSort::Recent => "t.created_at DESC, t.id DESC",
            TopicSort::Top => "score DESC, t.created_at DESC, t.id DESC",
        };
        let query = format!(
            "{STATS_SELECT}
             WHERE ($1::TEXT IS NULL OR $1 = ANY(t.categories))
             ORDER BY {order}
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TopicWithStats>(&query)
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Bump `updated_at` after activity on the topic.
    pub async fn touch(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE topics SET updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
