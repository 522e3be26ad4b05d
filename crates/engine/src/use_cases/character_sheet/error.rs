//! Character sheet operation errors.

use aspects_domain::{CharacterId, DomainError};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during character sheet operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterSheetError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Field validation failed: {field_id}: {message}")]
    FieldValidation { field_id: String, message: String },

    #[error("Not a list field: {0}")]
    NotAList(String),

    #[error("No item {index} in {list_id} (length {len})")]
    ItemOutOfRange {
        list_id: String,
        index: usize,
        len: usize,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl CharacterSheetError {
    pub(crate) fn field(field_id: &str, message: impl Into<String>) -> Self {
        Self::FieldValidation {
            field_id: field_id.to_string(),
            message: message.into(),
        }
    }
}
