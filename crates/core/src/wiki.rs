//! Wiki article validation, slug generation, internal links and line diffs.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API/repository layer and any future CLI tooling.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_SLUG_LENGTH: usize = 200;
pub const MAX_CONTENT_LENGTH: usize = 200_000;
pub const MAX_SUMMARY_LENGTH: usize = 1_000;
pub const MAX_EDIT_SUMMARY_LENGTH: usize = 500;
pub const MAX_SOURCES: usize = 50;
pub const MAX_CATEGORIES: usize = 20;
pub const MAX_CATEGORY_NAME_LENGTH: usize = 64;

/// Page size bounds for article history and the recent-changes feed.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;
pub const MAX_HISTORY_LIMIT: i64 = 500;
pub const DEFAULT_RECENT_LIMIT: i64 = 20;
pub const MAX_RECENT_LIMIT: i64 = 100;

/// Edit summary recorded on the first revision when the caller gives none.
pub const CREATED_SUMMARY: &str = "Article created";

/// Edit summary on the closing revision written when an article is deleted.
pub const DELETED_SUMMARY: &str = "Article deleted";

/// Edit summary recorded on a revert when the caller gives none.
pub fn revert_summary(revision_id: i64) -> String {
    format!("Reverted to revision {revision_id}")
}

// ---------------------------------------------------------------------------
// Slug generation
// ---------------------------------------------------------------------------

/// Generate a URL-safe slug from a title.
///
/// Lowercases, keeps ASCII alphanumerics and underscores, turns every other
/// run of characters into a single hyphen, and trims hyphens at both ends.
pub fn generate_slug(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut prev_hyphen = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }
    result.trim_matches('-').to_string()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a title (non-empty, at most [`MAX_TITLE_LENGTH`] characters).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a slug: lowercase alphanumerics, hyphens and underscores only.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters, hyphens and underscores"
                .into(),
        ));
    }
    Ok(())
}

/// Validate article content (non-empty, at most [`MAX_CONTENT_LENGTH`] characters).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Content must not be empty".into()));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Content must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_summary(summary: &str) -> Result<(), CoreError> {
    if summary.chars().count() > MAX_SUMMARY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Summary must be at most {MAX_SUMMARY_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_edit_summary(summary: &str) -> Result<(), CoreError> {
    if summary.chars().count() > MAX_EDIT_SUMMARY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Edit summary must be at most {MAX_EDIT_SUMMARY_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that a string is an absolute `http` or `https` URL.
pub fn validate_http_url(raw: &str) -> Result<(), CoreError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| CoreError::Validation(format!("Invalid URL '{raw}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(CoreError::Validation(format!(
            "URL '{raw}' must use http or https, not '{other}'"
        ))),
    }
}

/// Validate the citation list of an article.
pub fn validate_sources(sources: &[String]) -> Result<(), CoreError> {
    if sources.len() > MAX_SOURCES {
        return Err(CoreError::Validation(format!(
            "A maximum of {MAX_SOURCES} sources is allowed"
        )));
    }
    sources.iter().try_for_each(|s| validate_http_url(s))
}

/// Validate a category name (1-64 chars of letters, digits, spaces, `_` or `-`).
pub fn validate_category_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Category name must not be empty".into(),
        ));
    }
    if trimmed.len() != name.len() {
        return Err(CoreError::Validation(
            "Category name must not have leading or trailing whitespace".into(),
        ));
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category name must be at most {MAX_CATEGORY_NAME_LENGTH} characters"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '_' || c == '-')
    {
        return Err(CoreError::Validation(format!(
            "Category name '{name}' contains invalid characters"
        )));
    }
    Ok(())
}

/// Validate a list of category names and return it de-duplicated, keeping
/// first-seen order.
pub fn normalize_categories(categories: &[String]) -> Result<Vec<String>, CoreError> {
    if categories.len() > MAX_CATEGORIES {
        return Err(CoreError::Validation(format!(
            "A maximum of {MAX_CATEGORIES} categories is allowed"
        )));
    }
    let mut out: Vec<String> = Vec::with_capacity(categories.len());
    for name in categories {
        validate_category_name(name)?;
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Internal links
// ---------------------------------------------------------------------------

static INTERNAL_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("internal link pattern is valid"));

/// Extract the target slugs of `[[Internal Link]]` references.
///
/// `[[Target|label]]` links to `Target`. Results are de-duplicated and keep
/// first-seen order; links whose text slugifies to nothing are dropped.
pub fn parse_internal_links(content: &str) -> Vec<String> {
    let mut slugs: Vec<String> = Vec::new();
    for cap in INTERNAL_LINK.captures_iter(content) {
        let target = cap[1].split('|').next().unwrap_or_default();
        let slug = generate_slug(target);
        if !slug.is_empty() && !slugs.contains(&slug) {
            slugs.push(slug);
        }
    }
    slugs
}

// ---------------------------------------------------------------------------
// Simple line-level diff
// ---------------------------------------------------------------------------

/// The type of a line in a diff result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineType {
    Added,
    Removed,
    Unchanged,
}

impl DiffLineType {
    pub fn as_str(self) -> &'static str {
        match self {
            DiffLineType::Added => "added",
            DiffLineType::Removed => "removed",
            DiffLineType::Unchanged => "unchanged",
        }
    }
}

/// A single line in a diff result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub line_type: DiffLineType,
    pub content: String,
}

/// Largest LCS table [`compute_line_diff`] will build, in cells.
///
/// Lines shared at the start and end of both texts do not count towards it.
pub const MAX_DIFF_CELLS: usize = 4_000_000;

/// Compute a line-level diff between two texts using an LCS table.
///
/// Fails with a validation error when the differing middle section of the
/// two texts would need more than [`MAX_DIFF_CELLS`] table cells.
pub fn compute_line_diff(old: &str, new: &str) -> Result<Vec<DiffLine>, CoreError> {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();

    let prefix = old_lines
        .iter()
        .zip(&new_lines)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old_lines[prefix..]
        .iter()
        .rev()
        .zip(new_lines[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old_mid = &old_lines[prefix..old_lines.len() - suffix];
    let new_mid = &new_lines[prefix..new_lines.len() - suffix];
    let m = old_mid.len();
    let n = new_mid.len();

    if (m + 1).saturating_mul(n + 1) > MAX_DIFF_CELLS {
        return Err(CoreError::Validation(format!(
            "Revisions differ in too many lines to diff ({m} removed or changed, {n} added or changed)"
        )));
    }

    let mut lcs = vec![vec![0u32; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            lcs[i][j] = if old_mid[i - 1] == new_mid[j - 1] {
                lcs[i - 1][j - 1] + 1
            } else {
                lcs[i - 1][j].max(lcs[i][j - 1])
            };
        }
    }

    let line = |line_type, content: &str| DiffLine {
        line_type,
        content: content.to_string(),
    };

    let mut middle = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old_mid[i - 1] == new_mid[j - 1] {
            middle.push(line(DiffLineType::Unchanged, old_mid[i - 1]));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lcs[i][j - 1] >= lcs[i - 1][j]) {
            middle.push(line(DiffLineType::Added, new_mid[j - 1]));
            j -= 1;
        } else {
            middle.push(line(DiffLineType::Removed, old_mid[i - 1]));
            i -= 1;
        }
    }
    middle.reverse();

    let mut result = Vec::with_capacity(prefix + middle.len() + suffix);
    result.extend(
        old_lines[..prefix]
            .iter()
            .map(|l| line(DiffLineType::Unchanged, *l)),
    );
    result.extend(middle);
    result.extend(
        old_lines[old_lines.len() - suffix..]
            .iter()
            .map(|l| line(DiffLineType::Unchanged, *l)),
    );
    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -- generate_slug -------------------------------------------------------

    #[test]
    fn slug_basic_title() {
        assert_eq!(generate_slug("How to Edit"), "how-to-edit");
    }

    #[test]
    fn slug_keeps_underscores() {
        assert_eq!(generate_slug("Main_Page"), "main_page");
    }

    #[test]
    fn slug_collapses_punctuation_runs() {
        assert_eq!(generate_slug("Rust: Ownership (v2)!"), "rust-ownership-v2");
    }

    #[test]
    fn slug_of_symbols_only_is_empty() {
        assert_eq!(generate_slug("!!!"), "");
    }

    // -- validation ----------------------------------------------------------

    #[test]
    fn title_rules() {
        assert!(validate_title("Bitcoin").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"a".repeat(201)).is_err());
    }

    #[test]
    fn slug_rules() {
        assert!(validate_slug("main_page").is_ok());
        assert!(validate_slug("how-to-edit").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Main-Page").is_err());
        assert!(validate_slug("a b").is_err());
    }

    #[test]
    fn content_must_not_be_blank() {
        assert!(validate_content("Some text").is_ok());
        assert!(validate_content(" \n ").is_err());
    }

    #[test]
    fn content_limit_counts_characters() {
        let multibyte = "é".repeat(MAX_CONTENT_LENGTH);
        assert!(multibyte.len() > MAX_CONTENT_LENGTH);
        assert!(validate_content(&multibyte).is_ok());
        assert!(validate_content(&format!("{multibyte}é")).is_err());
    }

    #[test]
    fn sources_must_be_http_urls() {
        let ok = vec!["https://bitcoin.org/bitcoin.pdf".to_string()];
        assert!(validate_sources(&ok).is_ok());

        let bad_scheme = vec!["ftp://example.com/file".to_string()];
        assert!(validate_sources(&bad_scheme).is_err());

        let not_url = vec!["not a url".to_string()];
        assert!(validate_sources(&not_url).is_err());
    }

    #[test]
    fn categories_are_deduplicated_in_order() {
        let input = vec![
            "technology".to_string(),
            "science".to_string(),
            "technology".to_string(),
        ];
        assert_eq!(
            normalize_categories(&input).unwrap(),
            vec!["technology".to_string(), "science".to_string()]
        );
    }

    #[test]
    fn category_name_rejects_padding_and_symbols() {
        assert!(validate_category_name(" padded").is_err());
        assert!(validate_category_name("a/b").is_err());
        assert!(validate_category_name("Machine learning").is_ok());
    }

    // -- internal links ------------------------------------------------------

    #[test]
    fn links_are_slugified_and_deduplicated() {
        let content = "[[Bitcoin]] was created by [[Satoshi Nakamoto]]. See [[bitcoin]].";
        assert_eq!(
            parse_internal_links(content),
            vec!["bitcoin".to_string(), "satoshi-nakamoto".to_string()]
        );
    }

    #[test]
    fn piped_link_uses_target() {
        assert_eq!(
            parse_internal_links("see [[How to Edit|the guide]]"),
            vec!["how-to-edit".to_string()]
        );
    }

    #[test]
    fn no_links_yields_empty() {
        assert!(parse_internal_links("plain [text] only").is_empty());
    }

    // -- compute_line_diff ---------------------------------------------------

    #[test]
    fn diff_identical_texts() {
        let diff = compute_line_diff("line1\nline2", "line1\nline2").unwrap();
        assert_eq!(diff.len(), 2);
        assert!(diff.iter().all(|d| d.line_type == DiffLineType::Unchanged));
    }

    #[test]
    fn diff_added_line() {
        let diff = compute_line_diff("line1", "line1\nline2").unwrap();
        assert_eq!(diff[1].line_type, DiffLineType::Added);
        assert_eq!(diff[1].content, "line2");
    }

    #[test]
    fn diff_changed_line() {
        let diff = compute_line_diff("hello", "world").unwrap();
        let types: Vec<_> = diff.iter().map(|d| d.line_type).collect();
        assert_eq!(types, vec![DiffLineType::Removed, DiffLineType::Added]);
    }

    #[test]
    fn diff_keeps_shared_prefix_and_suffix_in_order() {
        let diff = compute_line_diff("a\nb\nc\nd", "a\nx\nc\nd").unwrap();
        let lines: Vec<_> = diff
            .iter()
            .map(|d| (d.line_type, d.content.as_str()))
            .collect();
        assert_eq!(
            lines,
            vec![
                (DiffLineType::Unchanged, "a"),
                (DiffLineType::Removed, "b"),
                (DiffLineType::Added, "x"),
                (DiffLineType::Unchanged, "c"),
                (DiffLineType::Unchanged, "d"),
            ]
        );
    }

    #[test]
    fn diff_small_edit_to_large_text_succeeds() {
        let old: String = (0..100_000).map(|i| format!("{i}\n")).collect();
        let new = old.replacen("50000\n", "changed\n", 1);
        let diff = compute_line_diff(&old, &new).unwrap();
        assert_eq!(diff.len(), 100_001);
        let changed: Vec<_> = diff
            .iter()
            .filter(|d| d.line_type != DiffLineType::Unchanged)
            .map(|d| d.content.as_str())
            .collect();
        assert_eq!(changed, vec!["50000", "changed"]);
    }

    #[test]
    fn diff_of_large_rewrite_is_rejected() {
        // Two maximum-size contents that share no lines.
        let old = "a\n".repeat(MAX_CONTENT_LENGTH / 2);
        let new = "b\n".repeat(MAX_CONTENT_LENGTH / 2);
        assert!(validate_content(&old).is_ok());
        assert_matches!(
            compute_line_diff(&old, &new),
            Err(CoreError::Validation(msg)) if msg.contains("too many lines")
        );
    }

    #[test]
    fn revert_summary_mentions_revision() {
        assert_eq!(revert_summary(7), "Reverted to revision 7");
    }
}
