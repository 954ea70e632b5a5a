//! Habit aggregate entity.

use serde::{Deserialize, Serialize};

use super::{Frequency, HabitPatch};
use crate::domain::foundation::{HabitError, HabitId, Timestamp};

/// Maximum length for a habit name.
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum length for the notes field.
pub const MAX_NOTES_LENGTH: usize = 200;

/// Payload for creating a habit, as supplied by the form layer.
///
/// `icon` and `color` are opaque presentation tags, validated upstream.
/// `is_active` defaults to `true` when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHabit {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub frequency: Frequency,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

impl NewHabit {
    /// Creates a payload with required fields; presentation tags empty.
    pub fn new(name: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            name: name.into(),
            icon: String::new(),
            color: String::new(),
            frequency,
            notes: None,
            is_active: None,
        }
    }
}

/// A user-defined recurring task with a fixed cadence.
///
/// # Invariants
///
/// - `id` is unique across the current habit set
/// - `name` is 1-50 characters
/// - `notes`, when present, is non-empty and at most 200 characters
/// - `created_at` is immutable
///
/// Inactive habits are excluded from progress and default listings but are
/// not deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    id: HabitId,
    name: String,
    icon: String,
    color: String,
    frequency: Frequency,
    notes: Option<String>,
    is_active: bool,
    created_at: Timestamp,
}

impl Habit {
    /// Creates a habit from a form payload.
    ///
    /// # Errors
    ///
    /// `Validation` if the name or notes break their length bounds.
    pub fn new(id: HabitId, data: NewHabit, created_at: Timestamp) -> Result<Self, HabitError> {
        validate_name(&data.name)?;
        let notes = normalize_notes(data.notes)?;
        Ok(Self {
            id,
            name: data.name,
            icon: data.icon,
            color: data.color,
            frequency: data.frequency,
            notes,
            is_active: data.is_active.unwrap_or(true),
            created_at,
        })
    }

    /// Reconstitutes a habit from persistence or a remote row (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: HabitId,
        name: String,
        icon: String,
        color: String,
        frequency: Frequency,
        notes: Option<String>,
        is_active: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            icon,
            color,
            frequency,
            notes,
            is_active,
            created_at,
        }
    }

    /// Returns a copy with the patch applied.
    ///
    /// Fields absent from the patch are unchanged. `notes` honors the
    /// tri-state clear/set/keep semantics and normalizes empty to absent.
    ///
    /// # Errors
    ///
    /// `Validation` if a patched field breaks its bounds.
    pub fn apply_patch(&self, patch: &HabitPatch) -> Result<Habit, HabitError> {
        let name = patch.name.clone().unwrap_or_else(|| self.name.clone());
        validate_name(&name)?;
        let notes = normalize_notes(patch.notes.clone().apply(self.notes.clone()))?;
        Ok(Self {
            id: self.id.clone(),
            name,
            icon: patch.icon.clone().unwrap_or_else(|| self.icon.clone()),
            color: patch.color.clone().unwrap_or_else(|| self.color.clone()),
            frequency: patch.frequency.unwrap_or(self.frequency),
            notes,
            is_active: patch.is_active.unwrap_or(self.is_active),
            created_at: self.created_at,
        })
    }

    /// Returns the habit id.
    pub fn id(&self) -> &HabitId {
        &self.id
    }

    /// Returns the habit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the icon tag.
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Returns the color tag.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the cadence.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the notes, if any.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns whether the habit participates in progress and listings.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns when the habit was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

fn validate_name(name: &str) -> Result<(), HabitError> {
    if name.trim().is_empty() {
        return Err(HabitError::validation("name", "must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(HabitError::validation(
            "name",
            format!("must be at most {MAX_NAME_LENGTH} characters"),
        ));
    }
    Ok(())
}

/// Empty notes are stored as absent, never as "present but blank".
fn normalize_notes(notes: Option<String>) -> Result<Option<String>, HabitError> {
    match notes {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => {
            if s.chars().count() > MAX_NOTES_LENGTH {
                return Err(HabitError::validation(
                    "notes",
                    format!("must be at most {MAX_NOTES_LENGTH} characters"),
                ));
            }
            Ok(Some(s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit_id() -> HabitId {
        HabitId::new("h1").unwrap()
    }

    fn minimal(name: &str) -> NewHabit {
        NewHabit::new(name, Frequency::Daily)
    }

    #[test]
    fn creates_with_defaults() {
        let habit = Habit::new(habit_id(), minimal("Read"), Timestamp::from_millis(0)).unwrap();
        assert_eq!(habit.name(), "Read");
        assert!(habit.is_active());
        assert_eq!(habit.notes(), None);
    }

    #[test]
    fn rejects_empty_name() {
        let result = Habit::new(habit_id(), minimal(""), Timestamp::from_millis(0));
        assert!(matches!(result, Err(HabitError::Validation { .. })));
        let result = Habit::new(habit_id(), minimal("   "), Timestamp::from_millis(0));
        assert!(matches!(result, Err(HabitError::Validation { .. })));
    }

    #[test]
    fn rejects_overlong_name() {
        let result = Habit::new(habit_id(), minimal(&"x".repeat(51)), Timestamp::from_millis(0));
        assert!(matches!(result, Err(HabitError::Validation { .. })));
    }

    #[test]
    fn normalizes_blank_notes_to_absent() {
        let mut data = minimal("Read");
        data.notes = Some("   ".to_string());
        let habit = Habit::new(habit_id(), data, Timestamp::from_millis(0)).unwrap();
        assert_eq!(habit.notes(), None);
    }

    #[test]
    fn rejects_overlong_notes() {
        let mut data = minimal("Read");
        data.notes = Some("x".repeat(201));
        let result = Habit::new(habit_id(), data, Timestamp::from_millis(0));
        assert!(matches!(result, Err(HabitError::Validation { .. })));
    }

    #[test]
    fn patch_leaves_omitted_fields_unchanged() {
        let mut data = minimal("Read");
        data.notes = Some("before bed".to_string());
        let habit = Habit::new(habit_id(), data, Timestamp::from_millis(7)).unwrap();

        let patched = habit
            .apply_patch(&HabitPatch::empty().with_name("Read more"))
            .unwrap();
        assert_eq!(patched.name(), "Read more");
        assert_eq!(patched.notes(), Some("before bed"));
        assert_eq!(patched.frequency(), Frequency::Daily);
        assert_eq!(patched.created_at(), habit.created_at());
    }

    #[test]
    fn patch_clear_is_distinct_from_omit() {
        let mut data = minimal("Read");
        data.notes = Some("before bed".to_string());
        let habit = Habit::new(habit_id(), data, Timestamp::from_millis(0)).unwrap();

        let kept = habit.apply_patch(&HabitPatch::empty()).unwrap();
        assert_eq!(kept.notes(), Some("before bed"));

        let cleared = habit.apply_patch(&HabitPatch::empty().clear_notes()).unwrap();
        assert_eq!(cleared.notes(), None);
    }

    #[test]
    fn patch_normalizes_blank_notes() {
        let habit = Habit::new(habit_id(), minimal("Read"), Timestamp::from_millis(0)).unwrap();
        let patched = habit.apply_patch(&HabitPatch::empty().with_notes("")).unwrap();
        assert_eq!(patched.notes(), None);
    }

    #[test]
    fn patch_replaces_frequency_wholesale() {
        let habit = Habit::new(habit_id(), minimal("Read"), Timestamp::from_millis(0)).unwrap();
        let patched = habit
            .apply_patch(&HabitPatch::empty().with_frequency(Frequency::Monthly))
            .unwrap();
        assert_eq!(patched.frequency(), Frequency::Monthly);
    }

    #[test]
    fn patch_rejects_invalid_name() {
        let habit = Habit::new(habit_id(), minimal("Read"), Timestamp::from_millis(0)).unwrap();
        let result = habit.apply_patch(&HabitPatch::empty().with_name(""));
        assert!(matches!(result, Err(HabitError::Validation { .. })));
    }
}
