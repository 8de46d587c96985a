//! HTTP handlers, one module per resource.

pub mod agents;
pub mod categories;
pub mod contributions;
pub mod documents;
pub mod meta;
pub mod search;
pub mod talk;
pub mod topics;
pub mod users;
pub mod wiki;
