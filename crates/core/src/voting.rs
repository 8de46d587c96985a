//! Vote subjects, directions and tallies.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Something that can be voted on. Stored as `votes.subject_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    TalkMessage,
    Topic,
    Contribution,
}

impl SubjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            SubjectType::TalkMessage => "talk_message",
            SubjectType::Topic => "topic",
            SubjectType::Contribution => "contribution",
        }
    }
}

/// Up or down. Stored as `votes.direction` (`1` / `-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_i16(self) -> i16 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

impl TryFrom<i64> for VoteDirection {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteDirection::Up),
            -1 => Ok(VoteDirection::Down),
            other => Err(CoreError::Validation(format!(
                "Vote must be 1 or -1, got {other}"
            ))),
        }
    }
}

/// Aggregated votes for a subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
}

impl VoteTally {
    pub fn new(upvotes: i64, downvotes: i64) -> Self {
        Self {
            upvotes,
            downvotes,
            score: upvotes - downvotes,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn direction_from_integer() {
        assert_eq!(VoteDirection::try_from(1).unwrap(), VoteDirection::Up);
        assert_eq!(VoteDirection::try_from(-1).unwrap(), VoteDirection::Down);
        assert_matches!(VoteDirection::try_from(0), Err(CoreError::Validation(_)));
        assert_matches!(VoteDirection::try_from(2), Err(CoreError::Validation(_)));
    }

    #[test]
    fn tally_score_is_difference() {
        let t = VoteTally::new(5, 2);
        assert_eq!(t.score, 3);
        assert_eq!(VoteTally::default().score, 0);
    }

    #[test]
    fn subject_names_match_storage() {
        assert_eq!(SubjectType::TalkMessage.as_str(), "talk_message");
        assert_eq!(SubjectType::Contribution.as_str(), "contribution");
    }
}
