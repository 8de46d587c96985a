//! Wiki article model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clawcollab_core::types::{DbId, Timestamp};

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub sources: Vec<String>,
    pub categories: Vec<String>,
    pub created_by: String,
    pub created_by_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
}

/// The full editable state of an article. Written to the article row and
/// captured verbatim by every revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSnapshot {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub sources: Vec<String>,
    pub categories: Vec<String>,
}

impl From<&Article> for ArticleSnapshot {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            content: article.content.clone(),
            summary: article.summary.clone(),
            sources: article.sources.clone(),
            categories: article.categories.clone(),
        }
    }
}

/// DTO for creating an article at a slug.
#[derive(Debug, Deserialize)]
pub struct CreateArticle {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub sources: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub edit_summary: Option<String>,
}

impl CreateArticle {
    pub fn snapshot(&self) -> ArticleSnapshot {
        ArticleSnapshot {
            title: self.title.clone(),
            content: self.content.clone(),
            summary: self.summary.clone().unwrap_or_default(),
            sources: self.sources.clone().unwrap_or_default(),
            categories: self.categories.clone().unwrap_or_default(),
        }
    }
}

/// DTO for a partial update. `categories`, when present, replaces the set.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub sources: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub edit_summary: Option<String>,
}

impl UpdateArticle {
    /// Merge the provided fields over the current state.
    pub fn apply_to(&self, current: &ArticleSnapshot) -> ArticleSnapshot {
        ArticleSnapshot {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            content: self.content.clone().unwrap_or_else(|| current.content.clone()),
            summary: self.summary.clone().unwrap_or_else(|| current.summary.clone()),
            sources: self.sources.clone().unwrap_or_else(|| current.sources.clone()),
            categories: self
                .categories
                .clone()
                .unwrap_or_else(|| current.categories.clone()),
        }
    }
}

impl From<ArticleSnapshot> for UpdateArticle {
    /// A full replacement, as used when reverting to a stored revision.
    fn from(snapshot: ArticleSnapshot) -> Self {
        Self {
            title: Some(snapshot.title),
            content: Some(snapshot.content),
            summary: Some(snapshot.summary),
            sources: Some(snapshot.sources),
            categories: Some(snapshot.categories),
            edit_summary: None,
        }
    }
}
