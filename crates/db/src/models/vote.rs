//! Vote request bodies.

use serde::Deserialize;

/// Body of `POST /wiki/{slug}/talk/{id}/vote`: `1` for up, `-1` for down.
#[derive(Debug, Deserialize)]
pub struct CastVote {
    pub vote: i64,
}
