//! Repository for `topic_documents` and its append-only `document_revisions`.

use sqlx::types::Json;
use sqlx::PgPool;

use clawcollab_core::topics::DocumentBlock;
use clawcollab_core::types::DbId;

use crate::models::actor::Actor;
use crate::models::document::{DocumentRevision, TopicDocument};

const COLUMNS: &str = "id, topic_id, blocks, version, format, created_by, last_edited_by, \
    created_at, updated_at";

const REVISION_COLUMNS: &str = "id, document_id, topic_id, blocks, version, edit_summary, \
    edited_by, edited_by_type, created_at";

pub struct DocumentRepo;

impl DocumentRepo {
    pub async fn find_by_topic(
        pool: &PgPool,
        topic_id: DbId,
    ) -> Result<Option<TopicDocument>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topic_documents WHERE topic_id = $1");
        sqlx::query_as::<_, TopicDocument>(&query)
            .bind(topic_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a topic's document blocks and append a revision.
    ///
    /// The first save creates version 1; each later save bumps the version.
    /// The existing row is locked so concurrent saves get distinct versions.
    pub async fn save(
        pool: &PgPool,
        topic_id: DbId,
        blocks: &[DocumentBlock],
        actor: &Actor,
        edit_summary: &str,
    ) -> Result<(TopicDocument, DocumentRevision), sqlx::Error> {
        let mut tx = pool.begin().await?;
        let blocks = Json(blocks);

        let lock = format!("SELECT {COLUMNS} FROM topic_documents WHERE topic_id = $1 FOR UPDATE");
        let existing = sqlx::query_as::<_, TopicDocument>(&lock)
            .bind(topic_id)
            .fetch_optional(&mut *tx)
            .await?;

        let document = match existing {
            Some(current) => {
                let query = format!(
                    "UPDATE topic_documents
                     SET blocks = $2, version = version + 1, last_edited_by = $3
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, TopicDocument>(&query)
                    .bind(current.id)
                    .bind(&blocks)
                    .bind(&actor.name)
                    .fetch_one(&mut *tx)
                    .await?
            }
            None => {
                let query = format!(
                    "INSERT INTO topic_documents (topic_id, blocks, version, created_by, last_edited_by)
                     VALUES ($1, $2, 1, $3, $3)
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, TopicDocument>(&query)
                    .bind(topic_id)
                    .bind(&blocks)
                    .bind(&actor.name)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        let query = format!(
            "INSERT INTO document_revisions
                (document_id, topic_id, blocks, version, edit_summary, edited_by, edited_by_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {REVISION_COLUMNS}"
        );
        let revision = sqlx::query_as::<_, DocumentRevision>(&query)
            .bind(document.id)
            .bind(topic_id)
            .bind(&blocks)
            .bind(document.version)
            .bind(edit_summary)
            .bind(&actor.name)
            .bind(actor.kind.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((document, revision))
    }

    /// Revisions of a topic's document, newest first.
    pub async fn list_revisions(
        pool: &PgPool,
        topic_id: DbId,
    ) -> Result<Vec<DocumentRevision>, sqlx::Error> {
        let query = format!(
            "SELECT {REVISION_COLUMNS} FROM document_revisions
             WHERE topic_id = $1
             ORDER BY version DESC"
        );
        sqlx::query_as::<_, DocumentRevision>(&query)
            .bind(topic_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_revision(
        pool: &PgPool,
        topic_id: DbId,
        version: i32,
    ) -> Result<Option<DocumentRevision>, sqlx::Error> {
        let query = format!(
            "SELECT {REVISION_COLUMNS} FROM document_revisions
             WHERE topic_id = $1 AND version = $2"
        );
        sqlx::query_as::<_, DocumentRevision>(&query)
            .bind(topic_id)
            .bind(version)
            .fetch_optional(pool)
            .await
    }
}
