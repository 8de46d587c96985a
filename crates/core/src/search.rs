//! Article search: pagination limits, candidate filtering and relevance scoring.
//!
//! The database narrows candidates with `ILIKE`; ranking happens here so the
//! weights stay testable without a database.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Relevance weights
// ---------------------------------------------------------------------------

/// Score awarded when the title contains the query.
pub const WEIGHT_TITLE: i64 = 10;

/// Score awarded when the summary contains the query.
pub const WEIGHT_SUMMARY: i64 = 2;

/// Upper bound on the score contributed by content occurrences.
pub const MAX_CONTENT_SCORE: i64 = 5;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of search results per page.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Maximum number of search results per page.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Characters of context on each side of the first content match.
pub const SNIPPET_CONTEXT: usize = 50;

/// Length of the fallback snippet when the content itself did not match.
pub const SNIPPET_FALLBACK_LEN: usize = 100;

// ---------------------------------------------------------------------------
// Query helpers
// ---------------------------------------------------------------------------

/// Trim the raw query and reject it when nothing is left.
pub fn normalize_query(query: &str) -> Result<&str, CoreError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Search query must not be empty".into(),
        ));
    }
    Ok(trimmed)
}

/// Escape `%`, `_` and `\` so the query matches literally inside `ILIKE`.
pub fn escape_like(query: &str) -> String {
    let mut out = String::with_capacity(query.len() + 2);
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Build a `%query%` pattern for a case-insensitive containment match.
pub fn like_pattern(query: &str) -> String {
    format!("%{}%", escape_like(query))
}

/// Clamp a user-supplied limit to `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp a user-supplied offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// The fields of an article that participate in ranking.
pub struct SearchCandidate<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub content: &'a str,
}

/// Count non-overlapping, case-insensitive occurrences of `needle`.
fn count_occurrences(haystack_lower: &str, needle_lower: &str) -> i64 {
    if needle_lower.is_empty() {
        return 0;
    }
    haystack_lower.matches(needle_lower).count() as i64
}

/// Score a candidate against a (non-empty) query.
///
/// Title match is worth [`WEIGHT_TITLE`], summary match [`WEIGHT_SUMMARY`],
/// and each content occurrence one point up to [`MAX_CONTENT_SCORE`]. The
/// non-title total stays below the title weight, so a title match always
/// ranks at or above a body-only match.
pub fn score(candidate: &SearchCandidate<'_>, query: &str) -> i64 {
    let q = query.to_lowercase();
    let mut total = 0;
    if candidate.title.to_lowercase().contains(&q) {
        total += WEIGHT_TITLE;
    }
    if candidate.summary.to_lowercase().contains(&q) {
        total += WEIGHT_SUMMARY;
    }
    total + count_occurrences(&candidate.content.to_lowercase(), &q).min(MAX_CONTENT_SCORE)
}

/// Build a result snippet around the first content match.
///
/// Returns up to [`SNIPPET_CONTEXT`] characters either side of the match,
/// wrapped in `...`. Falls back to the first [`SNIPPET_FALLBACK_LEN`]
/// characters when the content does not contain the query.
pub fn snippet(content: &str, query: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let lower: Vec<char> = chars.iter().flat_map(|c| c.to_lowercase()).collect();
    let needle: Vec<char> = query.to_lowercase().chars().collect();

    // Lowercasing can change char counts for a few scripts; only use the
    // lowered view for positions when it lines up with the original.
    let position = if lower.len() == chars.len() && !needle.is_empty() {
        lower.windows(needle.len()).position(|w| w == needle.as_slice())
    } else {
        None
    };

    match position {
        Some(start) => {
            let from = start.saturating_sub(SNIPPET_CONTEXT);
            let to = (start + needle.len() + SNIPPET_CONTEXT).min(chars.len());
            let body: String = chars[from..to].iter().collect();
            format!("...{body}...")
        }
        None => chars.iter().take(SNIPPET_FALLBACK_LEN).collect(),
    }
}

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedHit<T> {
    pub score: i64,
    pub snippet: String,
    #[serde(flatten)]
    pub item: T,
}

/// Score, sort and truncate search candidates.
///
/// `fields` projects each item onto its searchable text and `recency` gives a
/// sortable timestamp used to break score ties (newer first).
pub fn rank<T, K, F, R>(items: Vec<T>, query: &str, limit: usize, fields: F, recency: R) -> Vec<RankedHit<T>>
where
    K: Ord,
    F: Fn(&T) -> SearchCandidate<'_>,
    R: Fn(&T) -> K,
{
    let mut hits: Vec<(RankedHit<T>, K)> = items
        .into_iter()
        .map(|item| {
            let candidate = fields(&item);
            let s = score(&candidate, query);
            let snip = snippet(candidate.content, query);
            let key = recency(&item);
            (
                RankedHit {
                    score: s,
                    snippet: snip,
                    item,
                },
                key,
            )
        })
        .filter(|(hit, _)| hit.score > 0)
        .collect();

    hits.sort_by(|(a, ka), (b, kb)| b.score.cmp(&a.score).then_with(|| kb.cmp(ka)));
    hits.truncate(limit);
    hits.into_iter().map(|(hit, _)| hit).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
