//! Name rules shared by permissions, roles and usernames

use crate::repository::error::RepositoryError;

/// Longest accepted name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Normalize and validate a unique name.
///
/// Surrounding whitespace is trimmed. The trimmed value must be non-empty
/// and at most [`MAX_NAME_LEN`] characters. Returns the trimmed name.
pub fn validate_name(field: &'static str, name: &str) -> Result<String, RepositoryError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(RepositoryError::Validation {
            field,
            reason: "must not be empty".to_string(),
        });
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(RepositoryError::Validation {
            field,
            reason: format!("must be at most {} characters", MAX_NAME_LEN),
        });
    }

    Ok(trimmed.to_string())
}
