//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row, plus the input DTOs its repository accepts. Request bodies
//! are deserialized straight into these DTOs where the shapes line up.

pub mod actor;
pub mod agent;
pub mod article;
pub mod category;
pub mod contribution;
pub mod document;
pub mod revision;
pub mod stats;
pub mod talk;
pub mod topic;
pub mod user;
pub mod vote;
