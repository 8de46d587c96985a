//! Identity naming rules for agents and users.

use crate::error::CoreError;

pub const MIN_AGENT_NAME_LENGTH: usize = 2;
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_NAME_LENGTH: usize = 32;
pub const MIN_PASSWORD_LENGTH: usize = 6;

fn validate_handle(kind: &str, name: &str, min: usize) -> Result<(), CoreError> {
    let len = name.chars().count();
    if len < min || len > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{kind} must be {min}-{MAX_NAME_LENGTH} characters"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(CoreError::Validation(format!(
            "{kind} may only contain letters, digits, underscores and hyphens"
        )));
    }
    Ok(())
}

/// Agent names: 2-32 characters of `[A-Za-z0-9_-]`.
pub fn validate_agent_name(name: &str) -> Result<(), CoreError> {
    validate_handle("Agent name", name, MIN_AGENT_NAME_LENGTH)
}

/// Usernames follow the agent rules with a 3-character minimum.
pub fn validate_username(name: &str) -> Result<(), CoreError> {
    validate_handle("Username", name, MIN_USERNAME_LENGTH)
}

pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
