//! Partial-update payload for habits.

use serde::{Deserialize, Serialize};

use super::Frequency;

/// Tri-state patch field for optional habit attributes.
///
/// Distinguishes "leave the field alone" from "clear it", which a plain
/// `Option` cannot express.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldPatch<T> {
    /// Field absent from the patch; current value is kept.
    #[default]
    Keep,
    /// Explicitly reset the field to absent.
    Clear,
    /// Replace the field with a new value.
    Set(T),
}

impl<T> FieldPatch<T> {
    /// Resolves the patch against the current value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            FieldPatch::Keep => current,
            FieldPatch::Clear => None,
            FieldPatch::Set(value) => Some(value),
        }
    }
}

/// Partial update for a habit. Fields left as `None` / `Keep` are unchanged.
///
/// Payloads arrive pre-validated from the form layer; the aggregate still
/// re-checks length bounds defensively when the patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub frequency: Option<Frequency>,
    pub notes: FieldPatch<String>,
    pub is_active: Option<bool>,
}

impl HabitPatch {
    /// A patch that changes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder-style setter for the habit name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder-style setter for the icon tag.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Builder-style setter for the color tag.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Builder-style setter replacing the cadence wholesale.
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Builder-style setter for the notes field.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = FieldPatch::Set(notes.into());
        self
    }

    /// Builder-style setter clearing the notes field.
    pub fn clear_notes(mut self) -> Self {
        self.notes = FieldPatch::Clear;
        self
    }

    /// Builder-style setter for the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_preserves_current_value() {
        let patch: FieldPatch<String> = FieldPatch::Keep;
        assert_eq!(patch.apply(Some("note".to_string())), Some("note".to_string()));
    }

    #[test]
    fn clear_discards_current_value() {
        let patch: FieldPatch<String> = FieldPatch::Clear;
        assert_eq!(patch.apply(Some("note".to_string())), None);
    }

    #[test]
    fn set_replaces_current_value() {
        let patch = FieldPatch::Set("new".to_string());
        assert_eq!(patch.apply(Some("old".to_string())), Some("new".to_string()));
    }

    #[test]
    fn default_patch_changes_nothing() {
        let patch = HabitPatch::empty();
        assert_eq!(patch.name, None);
        assert_eq!(patch.notes, FieldPatch::Keep);
        assert_eq!(patch.is_active, None);
    }
}
