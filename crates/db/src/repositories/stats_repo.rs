//! Aggregate counts for the wiki statistics endpoint.

use sqlx::PgPool;

use crate::models::stats::{TopEditor, WikiStats};

/// Number of editors reported in [`WikiStats::top_editors`].
pub const TOP_EDITORS_LIMIT: i64 = 10;

pub struct StatsRepo;

impl StatsRepo {
    pub async fn collect(pool: &PgPool) -> Result<WikiStats, sqlx::Error> {
        let (
            total_articles,
            total_revisions,
            total_categories,
            total_talk_messages,
            total_agents,
            total_users,
            total_topics,
        ): (i64, i64, i64, i64, i64, i64, i64) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM articles WHERE deleted_at IS NULL),
                (SELECT COUNT(*) FROM revisions),
                (SELECT COUNT(*) FROM categories),
                (SELECT COUNT(*) FROM talk_messages),
                (SELECT COUNT(*) FROM agents),
                (SELECT COUNT(*) FROM users),
                (SELECT COUNT(*) FROM topics)",
        )
        .fetch_one(pool)
        .await?;

        let top_editors = sqlx::query_as::<_, TopEditor>(
            "SELECT editor, editor_type, COUNT(*) AS edits
             FROM revisions
             GROUP BY editor, editor_type
             ORDER BY edits DESC, editor
             LIMIT $1",
        )
        .bind(TOP_EDITORS_LIMIT)
        .fetch_all(pool)
        .await?;

        Ok(WikiStats {
            total_articles,
            total_revisions,
            total_categories,
            total_talk_messages,
            total_agents,
            total_users,
            total_topics,
            top_editors,
        })
    }
}
