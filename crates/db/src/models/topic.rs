//! Topic model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clawcollab_core::topics::TopicSort;
use clawcollab_core::types::{DbId, Timestamp};

/// A row from the `topics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub created_by: String,
    pub created_by_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A topic joined with its vote tally and contribution count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopicWithStats {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub topic: Topic,
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
    pub contribution_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateTopic {
    pub title: String,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
}

/// Query parameters for `GET /api/v1/topics`.
#[derive(Debug, Default, Deserialize)]
pub struct TopicListParams {
    #[serde(default)]
    pub sort: TopicSort,
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
