//! Error taxonomy for the habit engine.

use thiserror::Error;

use super::HabitId;

/// Errors surfaced by repository operations and the domain layer.
///
/// A failed mutation always leaves the in-memory cache in its pre-operation
/// state; callers can retry or present the error without reconciling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HabitError {
    /// Input failed a defensive check. Validation proper belongs to the form
    /// layer; this variant should not be reachable from well-formed payloads.
    #[error("Field '{field}' is invalid: {reason}")]
    Validation { field: String, reason: String },

    /// Operation referenced a habit outside the current scope.
    #[error("Habit not found: {0}")]
    NotFound(HabitId),

    /// The backing store rejected or failed a write.
    #[error("Backing store write failed: {0}")]
    Persistence(String),

    /// The backing store could not be read.
    #[error("Backing store read failed: {0}")]
    Load(String),
}

impl HabitError {
    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        HabitError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a not-found error for a habit id.
    pub fn not_found(id: HabitId) -> Self {
        HabitError::NotFound(id)
    }

    /// Creates a persistence (write) error.
    pub fn persistence(message: impl Into<String>) -> Self {
        HabitError::Persistence(message.into())
    }

    /// Creates a load (read) error.
    pub fn load(message: impl Into<String>) -> Self {
        HabitError::Load(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_field_and_reason() {
        let err = HabitError::validation("name", "must not be empty");
        assert_eq!(err.to_string(), "Field 'name' is invalid: must not be empty");
    }

    #[test]
    fn not_found_error_displays_id() {
        let id = HabitId::new("h1").unwrap();
        let err = HabitError::not_found(id);
        assert_eq!(err.to_string(), "Habit not found: h1");
    }

    #[test]
    fn persistence_error_displays_message() {
        let err = HabitError::persistence("connection reset");
        assert!(err.to_string().contains("write failed"));
    }
}
