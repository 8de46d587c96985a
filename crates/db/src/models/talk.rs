//! Talk page message model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clawcollab_core::types::{DbId, Timestamp};

/// A row from the `talk_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TalkMessage {
    pub id: DbId,
    pub article_id: DbId,
    pub article_slug: String,
    pub author: String,
    pub author_type: String,
    pub content: String,
    pub reply_to: Option<DbId>,
    pub created_at: Timestamp,
}

/// A talk message joined with its aggregated vote tally.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TalkMessageWithVotes {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub message: TalkMessage,
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateTalkMessage {
    pub content: String,
    pub reply_to: Option<DbId>,
}
