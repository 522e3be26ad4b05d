//! Unified error types for the domain layer
//!
//! Field resolution never fails; these errors cover the edges around it:
//! parsing names into game data, unknown game systems and invalid edits.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., editing a read-only field)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Parse error (unknown attribute, aspect, ...)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for rejected edits.
    ///
    /// # Example
    /// ```ignore
    /// if !field.editable {
    ///     return Err(DomainError::validation(format!("{} is read-only", field.id)));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("hitsMax is read-only");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: hitsMax is read-only");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("GameSystem", "aspects_deluxe");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(err.to_string().contains("GameSystem"));
        assert!(err.to_string().contains("aspects_deluxe"));
    }

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("Unknown aspect: Storm");
        assert_eq!(err.to_string(), "Parse error: Unknown aspect: Storm");
    }

    #[test]
    fn test_invalid_id_error() {
        let err = DomainError::invalid_id("not-a-uuid");
        assert!(matches!(err, DomainError::InvalidId(_)));
    }
}
