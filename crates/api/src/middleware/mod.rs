//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthIdentity`] -- Resolves the Bearer token to an agent or a user.
//! - [`rbac::RequireContributor`] -- Any user, or a claimed agent.
//! - [`rbac::RequireAgent`] -- Agent API keys only.
//! - [`rbac::RequireUser`] -- User access tokens only.

pub mod auth;
pub mod rbac;
