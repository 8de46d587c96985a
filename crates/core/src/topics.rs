//! Topic, contribution and collaborative document validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::wiki::validate_http_url;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const MIN_TOPIC_TITLE_LENGTH: usize = 3;
pub const MAX_TOPIC_TITLE_LENGTH: usize = 200;
pub const MAX_TOPIC_DESCRIPTION_LENGTH: usize = 5_000;
pub const MAX_CONTRIBUTION_LENGTH: usize = 100_000;
pub const MAX_DOCUMENT_BLOCKS: usize = 500;
pub const MAX_BLOCK_CONTENT_LENGTH: usize = 50_000;

/// Default page size for topic listings.
pub const DEFAULT_TOPIC_LIMIT: i64 = 20;
pub const MAX_TOPIC_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

pub fn validate_topic_title(title: &str) -> Result<(), CoreError> {
    let len = title.trim().chars().count();
    if !(MIN_TOPIC_TITLE_LENGTH..=MAX_TOPIC_TITLE_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Topic title must be {MIN_TOPIC_TITLE_LENGTH}-{MAX_TOPIC_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_topic_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > MAX_TOPIC_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Topic description must be at most {MAX_TOPIC_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Ordering for topic listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicSort {
    #[default]
    Recent,
    Top,
}

// ---------------------------------------------------------------------------
// Contributions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Code,
    Link,
    Document,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Code => "code",
            ContentType::Link => "link",
            ContentType::Document => "document",
        }
    }
}

/// Check a contribution's fields against its content type.
///
/// Links need an http(s) `file_url`; every other type needs non-empty
/// `content`.
pub fn validate_contribution(
    content_type: ContentType,
    content: Option<&str>,
    file_url: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(text) = content {
        if text.len() > MAX_CONTRIBUTION_LENGTH {
            return Err(CoreError::Validation(format!(
                "Contribution content must be at most {MAX_CONTRIBUTION_LENGTH} characters"
            )));
        }
    }
    match content_type {
        ContentType::Link => match file_url {
            Some(url) => validate_http_url(url),
            None => Err(CoreError::Validation(
                "Link contributions require a file_url".into(),
            )),
        },
        _ => match content.map(str::trim) {
            Some(text) if !text.is_empty() => Ok(()),
            _ => Err(CoreError::Validation(format!(
                "{} contributions require content",
                content_type.as_str()
            ))),
        },
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Heading,
    Paragraph,
    Code,
    List,
    Quote,
}

/// One block of a topic document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Validate a full block list: size bounds and unique non-empty ids.
pub fn validate_blocks(blocks: &[DocumentBlock]) -> Result<(), CoreError> {
    if blocks.len() > MAX_DOCUMENT_BLOCKS {
        return Err(CoreError::Validation(format!(
            "A document may contain at most {MAX_DOCUMENT_BLOCKS} blocks"
        )));
    }
    let mut seen = HashSet::with_capacity(blocks.len());
    for block in blocks {
        if block.id.trim().is_empty() {
            return Err(CoreError::Validation("Block id must not be empty".into()));
        }
        if !seen.insert(block.id.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate block id '{}'",
                block.id
            )));
        }
        if block.content.len() > MAX_BLOCK_CONTENT_LENGTH {
            return Err(CoreError::Validation(format!(
                "Block '{}' exceeds {MAX_BLOCK_CONTENT_LENGTH} characters",
                block.id
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
