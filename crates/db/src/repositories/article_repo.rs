//! Repository for the `articles` table.
//!
//! Every create and update appends a revision inside the same transaction,
//! so the article row always equals its latest revision.

use sqlx::PgPool;

use clawcollab_core::types::DbId;

use crate::models::actor::Actor;
use crate::models::article::{Article, ArticleSnapshot, UpdateArticle};
use crate::models::revision::Revision;
use crate::repositories::{AgentRepo, CategoryRepo, RevisionRepo};

/// Column list for articles queries.
const COLUMNS: &str = "id, slug, title, content, summary, sources, categories, \
    created_by, created_by_type, created_at, updated_at, deleted_at";

/// Upper bound on rows pulled into memory for search ranking.
pub const SEARCH_CANDIDATE_CAP: i64 = 1000;

pub struct ArticleRepo;

impl ArticleRepo {
    /// Create a live article at `slug` together with its first revision.
    ///
    /// A live article already holding the slug violates
    /// `uq_articles_live_slug` and surfaces as a unique-violation error.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        snapshot: &ArticleSnapshot,
        actor: &Actor,
        edit_summary: &str,
    ) -> Result<(Article, Revision), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO articles
                (slug, title, content, summary, sources, categories, created_by, created_by_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let article = sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .bind(&snapshot.title)
            .bind(&snapshot.content)
            .bind(&snapshot.summary)
            .bind(&snapshot.sources)
            .bind(&snapshot.categories)
            .bind(&actor.name)
            .bind(actor.kind.as_str())
            .fetch_one(&mut *tx)
            .await?;

        CategoryRepo::ensure_exist(&mut *tx, &snapshot.categories).await?;
        let revision = RevisionRepo::append(&mut *tx, &article, snapshot, actor, edit_summary).await?;
        AgentRepo::record_edit(&mut *tx, actor).await?;

        tx.commit().await?;
        Ok((article, revision))
    }

    /// Find the live article at `slug`.
    pub async fn find_live_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE slug = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update to the live article and append a revision.
    ///
    /// The row is locked for the duration of the transaction so concurrent
    /// updates serialize. Returns `None` if no live article holds the slug.
    pub async fn update(
        pool: &PgPool,
        slug: &str,
        changes: &UpdateArticle,
        actor: &Actor,
        edit_summary: &str,
    ) -> Result<Option<(Article, Revision)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock = format!(
            "SELECT {COLUMNS} FROM articles WHERE slug = $1 AND deleted_at IS NULL FOR UPDATE"
        );
        let Some(current) = sqlx::query_as::<_, Article>(&lock)
            .bind(slug)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let next = changes.apply_to(&ArticleSnapshot::from(&current));
        let query = format!(
            "UPDATE articles SET
                title = $2, content = $3, summary = $4, sources = $5, categories = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let article = sqlx::query_as::<_, Article>(&query)
            .bind(current.id)
            .bind(&next.title)
            .bind(&next.content)
            .bind(&next.summary)
            .bind(&next.sources)
            .bind(&next.categories)
            .fetch_one(&mut *tx)
            .await?;

        CategoryRepo::ensure_exist(&mut *tx, &next.categories).await?;
        let revision = RevisionRepo::append(&mut *tx, &article, &next, actor, edit_summary).await?;
        AgentRepo::record_edit(&mut *tx, actor).await?;

        tx.commit().await?;
        Ok(Some((article, revision)))
    }

    /// Soft-delete the live article at `slug`.
    ///
    /// Appends a closing revision carrying the final snapshot and the acting
    /// identity before marking the row deleted, both in one transaction.
    /// Returns `None` if no live article holds the slug.
    pub async fn soft_delete(
        pool: &PgPool,
        slug: &str,
        actor: &Actor,
        edit_summary: &str,
    ) -> Result<Option<Revision>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock = format!(
            "SELECT {COLUMNS} FROM articles WHERE slug = $1 AND deleted_at IS NULL FOR UPDATE"
        );
        let Some(current) = sqlx::query_as::<_, Article>(&lock)
            .bind(slug)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let snapshot = ArticleSnapshot::from(&current);
        let revision =
            RevisionRepo::append(&mut *tx, &current, &snapshot, actor, edit_summary).await?;

        sqlx::query("UPDATE articles SET deleted_at = now() WHERE id = $1")
            .bind(current.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(revision))
    }

    /// Pick one live article uniformly at random.
    pub async fn random(pool: &PgPool) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles WHERE deleted_at IS NULL ORDER BY random() LIMIT 1"
        );
        sqlx::query_as::<_, Article>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Live articles tagged with `category`, by title.
    pub async fn list_by_category(
        pool: &PgPool,
        category: &str,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles
             WHERE deleted_at IS NULL AND $1 = ANY(categories)
             ORDER BY title"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Live articles whose title, summary or content matches an `ILIKE`
    /// pattern. `pattern` must already have its wildcards escaped.
    ///
    /// Title matches come first, then summary matches, so the candidate cap
    /// never drops a title hit in favour of newer body-only hits.
    pub async fn search_candidates(
        pool: &PgPool,
        pattern: &str,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles
             WHERE deleted_at IS NULL
               AND (title ILIKE $1 ESCAPE '\\'
                    OR summary ILIKE $1 ESCAPE '\\'
                    OR content ILIKE $1 ESCAPE '\\')
             ORDER BY (title ILIKE $1 ESCAPE '\\') DESC,
                      (summary ILIKE $1 ESCAPE '\\') DESC,
                      updated_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(pattern)
            .bind(SEARCH_CANDIDATE_CAP)
            .fetch_all(pool)
            .await
    }
}
