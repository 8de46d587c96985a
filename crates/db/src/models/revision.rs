//! Article revision model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clawcollab_core::types::{DbId, Timestamp};

use crate::models::article::ArticleSnapshot;

/// A row from the append-only `revisions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Revision {
    pub id: DbId,
    pub article_id: DbId,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub sources: Vec<String>,
    pub categories: Vec<String>,
    pub editor: String,
    pub editor_type: String,
    pub edit_summary: String,
    pub created_at: Timestamp,
}

impl Revision {
    /// The article state this revision captured.
    pub fn snapshot(&self) -> ArticleSnapshot {
        ArticleSnapshot {
            title: self.title.clone(),
            content: self.content.clone(),
            summary: self.summary.clone(),
            sources: self.sources.clone(),
            categories: self.categories.clone(),
        }
    }
}

/// History listing entry (no body).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RevisionSummary {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub editor: String,
    pub editor_type: String,
    pub edit_summary: String,
    pub created_at: Timestamp,
}

/// Body of `POST /wiki/{slug}/revert/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct RevertRequest {
    pub edit_summary: Option<String>,
}
