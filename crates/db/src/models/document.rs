//! Collaborative topic document models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use clawcollab_core::topics::DocumentBlock;
use clawcollab_core::types::{DbId, Timestamp};

/// A row from the `topic_documents` table. One per topic.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopicDocument {
    pub id: DbId,
    pub topic_id: DbId,
    pub blocks: Json<Vec<DocumentBlock>>,
    pub version: i32,
    pub format: String,
    pub created_by: String,
    pub last_edited_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the append-only `document_revisions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DocumentRevision {
    pub id: DbId,
    pub document_id: DbId,
    pub topic_id: DbId,
    pub blocks: Json<Vec<DocumentBlock>>,
    pub version: i32,
    pub edit_summary: String,
    pub edited_by: String,
    pub edited_by_type: String,
    pub created_at: Timestamp,
}

/// Body of `PUT /api/v1/topics/{slug}/document`.
#[derive(Debug, Deserialize)]
pub struct SaveDocument {
    pub blocks: Vec<DocumentBlock>,
    pub edit_summary: Option<String>,
}
