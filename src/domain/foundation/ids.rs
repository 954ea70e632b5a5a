//! Strongly-typed identifier value objects.
//!
//! All ids are opaque strings. Habit and completion ids come in two
//! namespaces that never collide in format: server-assigned ids (whatever the
//! remote store mints) and locally-minted guest ids, which always carry the
//! `guest-` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::HabitError;

/// Prefix marking ids minted locally in guest mode.
pub(crate) const GUEST_ID_PREFIX: &str = "guest-";

/// Unique identifier for a habit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Creates a HabitId from an existing id, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, HabitError> {
        let id = id.into();
        if id.is_empty() {
            return Err(HabitError::validation("habit_id", "must not be empty"));
        }
        Ok(Self(id))
    }

    /// Mints a fresh guest-namespaced id, unique within the process.
    pub fn mint_guest() -> Self {
        Self(format!("{}{}", GUEST_ID_PREFIX, Uuid::new_v4()))
    }

    /// Returns true if this id was minted locally in guest mode.
    pub fn is_guest(&self) -> bool {
        self.0.starts_with(GUEST_ID_PREFIX)
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a completion record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionId(String);

impl CompletionId {
    /// Creates a CompletionId from an existing id, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, HabitError> {
        let id = id.into();
        if id.is_empty() {
            return Err(HabitError::validation("completion_id", "must not be empty"));
        }
        Ok(Self(id))
    }

    /// Mints a fresh guest-namespaced id, unique within the process.
    pub fn mint_guest() -> Self {
        Self(format!("{}{}", GUEST_ID_PREFIX, Uuid::new_v4()))
    }

    /// Returns true if this id was minted locally in guest mode.
    pub fn is_guest(&self) -> bool {
        self.0.starts_with(GUEST_ID_PREFIX)
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompletionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identifier (from the auth provider).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, HabitError> {
        let id = id.into();
        if id.is_empty() {
            return Err(HabitError::validation("user_id", "must not be empty"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
