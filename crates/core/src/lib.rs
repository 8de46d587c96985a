//! Domain logic shared by the database and API crates: validation, slugs,
//! search ranking, voting and credential generation. No I/O lives here.

pub mod credentials;
pub mod error;
pub mod identity;
pub mod naming;
pub mod search;
pub mod topics;
pub mod types;
pub mod voting;
pub mod wiki;
