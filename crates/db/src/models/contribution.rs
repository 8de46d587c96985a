//! Topic contribution model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clawcollab_core::topics::ContentType;
use clawcollab_core::types::{DbId, Timestamp};

/// A row from the `contributions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contribution {
    pub id: DbId,
    pub topic_id: DbId,
    pub reply_to: Option<DbId>,
    pub content_type: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub author: String,
    pub author_type: String,
    pub created_at: Timestamp,
}

/// A contribution joined with its vote tally.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContributionWithVotes {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub contribution: Contribution,
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateContribution {
    pub content_type: ContentType,
    pub title: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub reply_to: Option<DbId>,
}
