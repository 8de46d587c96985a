//! Repository for the append-only `revisions` table.
//!
//! Rows are only ever inserted. There is no update or delete method.

use sqlx::{PgConnection, PgPool};

use clawcollab_core::types::DbId;

use crate::models::actor::Actor;
use crate::models::article::{Article, ArticleSnapshot};
use crate::models::revision::{Revision, RevisionSummary};

const COLUMNS: &str = "id, article_id, slug, title, content, summary, sources, categories, \
    editor, editor_type, edit_summary, created_at";

const SUMMARY_COLUMNS: &str = "id, slug, title, editor, editor_type, edit_summary, created_at";

pub struct RevisionRepo;

impl RevisionRepo {
    /// Append a revision capturing `snapshot` for `article`.
    ///
    /// Runs on the caller's connection so it commits with the article write.
    pub async fn append(
        conn: &mut PgConnection,
        article: &Article,
        snapshot: &ArticleSnapshot,
        actor: &Actor,
        edit_summary: &str,
    ) -> Result<Revision, sqlx::Error> {
        let query = format!(
            "INSERT INTO revisions
                (article_id, slug, title, content, summary, sources, categories,
                 editor, editor_type, edit_summary)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(article.id)
            .bind(&article.slug)
            .bind(&snapshot.title)
            .bind(&snapshot.content)
            .bind(&snapshot.summary)
            .bind(&snapshot.sources)
            .bind(&snapshot.categories)
            .bind(&actor.name)
            .bind(actor.kind.as_str())
            .bind(edit_summary)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a revision by id, only if it was recorded under `slug`.
    ///
    /// Works for deleted articles too.
    pub async fn find_for_slug(
        pool: &PgPool,
        slug: &str,
        id: DbId,
    ) -> Result<Option<Revision>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM revisions WHERE id = $1 AND slug = $2");
        sqlx::query_as::<_, Revision>(&query)
            .bind(id)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// History of a slug, newest first.
    pub async fn list_for_slug(
        pool: &PgPool,
        slug: &str,
        limit: i64,
    ) -> Result<Vec<RevisionSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM revisions
             WHERE slug = $1
             ORDER BY id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, RevisionSummary>(&query)
            .bind(slug)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Most recent revisions across all articles, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<RevisionSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM revisions ORDER BY id DESC LIMIT $1");
        sqlx::query_as::<_, RevisionSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Number of revisions recorded for an article row.
    pub async fn count_for_article(pool: &PgPool, article_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM revisions WHERE article_id = $1")
                .bind(article_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
