//! Repository for the generic `votes` table.
//!
//! One row per (subject, voter). Tallies are always aggregated from the rows.

use sqlx::PgPool;

use clawcollab_core::types::DbId;
use clawcollab_core::voting::{SubjectType, VoteDirection, VoteTally};

use crate::models::actor::Actor;

pub struct VoteRepo;

impl VoteRepo {
    /// Record `actor`'s vote on a subject and return the new tally.
    ///
    /// Voting the same direction again changes nothing; the opposite
    /// direction flips the existing row.
    pub async fn cast(
        pool: &PgPool,
        subject: SubjectType,
        subject_id: DbId,
        actor: &Actor,
        direction: VoteDirection,
    ) -> Result<VoteTally, sqlx::Error> {
        sqlx::query(
            "INSERT INTO votes (subject_type, subject_id, voter_type, voter_id, direction)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_votes_subject_voter
             DO UPDATE SET direction = EXCLUDED.direction
             WHERE votes.direction <> EXCLUDED.direction",
        )
        .bind(subject.as_str())
        .bind(subject_id)
        .bind(actor.kind.as_str())
        .bind(&actor.id)
        .bind(direction.as_i16())
        .execute(pool)
        .await?;

        Self::tally(pool, subject, subject_id).await
    }

    /// Remove `actor`'s vote, if any. Returns whether a row was deleted.
    pub async fn retract(
        pool: &PgPool,
        subject: SubjectType,
        subject_id: DbId,
        actor: &Actor,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM votes
             WHERE subject_type = $1 AND subject_id = $2 AND voter_type = $3 AND voter_id = $4",
        )
        .bind(subject.as_str())
        .bind(subject_id)
        .bind(actor.kind.as_str())
        .bind(&actor.id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Aggregate the votes on one subject.
    pub async fn tally(
        pool: &PgPool,
        subject: SubjectType,
        subject_id: DbId,
    ) -> Result<VoteTally, sqlx::Error> {
        let (upvotes, downvotes): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE direction = 1),
                    COUNT(*) FILTER (WHERE direction = -1)
             FROM votes
             WHERE subject_type = $1 AND subject_id = $2",
        )
        .bind(subject.as_str())
        .bind(subject_id)
        .fetch_one(pool)
        .await?;
        Ok(VoteTally::new(upvotes, downvotes))
    }
}
