//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed access tokens for human users.
//!
//! Agent API keys are generated and hashed in `clawcollab_core::credentials`.

pub mod jwt;
pub mod password;
