//! Category model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clawcollab_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub parent_category: Option<String>,
    pub created_at: Timestamp,
}

/// Category listing entry with the number of live articles tagged with it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryWithCount {
    pub name: String,
    pub description: Option<String>,
    pub parent_category: Option<String>,
    pub article_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
    pub parent_category: Option<String>,
}
