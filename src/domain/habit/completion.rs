//! Completion record entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CalendarDate, CompletionId, HabitId, Timestamp};

/// A record that one habit was performed on one calendar day.
///
/// # Invariants
///
/// - at most one completion exists per `(habit_id, date)` pair
/// - a completion never outlives its habit (cascade delete)
/// - created and removed only via the toggle operation, never updated
///
/// `completed_at` records when the row was written, for audit and ordering;
/// matching is always done on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    id: CompletionId,
    habit_id: HabitId,
    date: CalendarDate,
    completed_at: Timestamp,
}

impl Completion {
    /// Creates a completion record.
    pub fn new(
        id: CompletionId,
        habit_id: HabitId,
        date: CalendarDate,
        completed_at: Timestamp,
    ) -> Self {
        Self {
            id,
            habit_id,
            date,
            completed_at,
        }
    }

    /// Returns the completion id.
    pub fn id(&self) -> &CompletionId {
        &self.id
    }

    /// Returns the habit this completion belongs to.
    pub fn habit_id(&self) -> &HabitId {
        &self.habit_id
    }

    /// Returns the calendar day this completion marks.
    pub fn date(&self) -> CalendarDate {
        self.date
    }

    /// Returns when the record was written.
    pub fn completed_at(&self) -> &Timestamp {
        &self.completed_at
    }

    /// Checks whether this record marks the given habit on the given day.
    pub fn matches(&self, habit_id: &HabitId, date: CalendarDate) -> bool {
        &self.habit_id == habit_id && self.date == date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_on_habit_and_date() {
        let habit = HabitId::new("h1").unwrap();
        let other = HabitId::new("h2").unwrap();
        let date: CalendarDate = "2024-01-01".parse().unwrap();
        let completion = Completion::new(
            CompletionId::new("c1").unwrap(),
            habit.clone(),
            date,
            Timestamp::from_millis(0),
        );

        assert!(completion.matches(&habit, date));
        assert!(!completion.matches(&other, date));
        assert!(!completion.matches(&habit, "2024-01-02".parse().unwrap()));
    }
}
