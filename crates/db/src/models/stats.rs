//! Aggregate statistics for `GET /stats`.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopEditor {
    pub editor: String,
    pub editor_type: String,
    pub edits: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WikiStats {
    pub total_articles: i64,
    pub total_revisions: i64,
    pub total_categories: i64,
    pub total_talk_messages: i64,
    pub total_agents: i64,
    pub total_users: i64,
    pub total_topics: i64,
    pub top_editors: Vec<TopEditor>,
}
