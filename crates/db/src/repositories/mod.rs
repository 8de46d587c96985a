//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Writes that touch more than one
//! row open a transaction; helpers called inside one take `&mut PgConnection`.

pub mod agent_repo;
pub mod article_repo;
pub mod category_repo;
pub mod contribution_repo;
pub mod document_repo;
pub mod revision_repo;
pub mod stats_repo;
pub mod talk_repo;
pub mod topic_repo;
pub mod user_repo;
pub mod vote_repo;

pub use agent_repo::AgentRepo;
pub use article_repo::ArticleRepo;
pub use category_repo::CategoryRepo;
pub use contribution_repo::ContributionRepo;
pub use document_repo::DocumentRepo;
pub use revision_repo::RevisionRepo;
pub use stats_repo::StatsRepo;
pub use talk_repo::TalkRepo;
pub use topic_repo::TopicRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
