//! Storage backend capability.
//!
//! One interface, two strategies: `RemoteBackend` (authenticated, remote
//! store is the source of truth) and `LocalBackend` (guest, the in-memory
//! cache is the store). The repository picks one per operation from the
//! session oracle instead of branching on authentication inside every
//! method.

use async_trait::async_trait;

use crate::domain::foundation::{CalendarDate, HabitError, HabitId};
use crate::domain::habit::{Completion, Habit, HabitPatch, NewHabit, StateSnapshot};

/// The active data store for one operation.
///
/// Backends confirm writes before the repository reflects them into the
/// cache; a backend error must leave the backing store unchanged from the
/// caller's point of view.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Fetches the full habit and completion sets for the current scope.
    ///
    /// Returns `None` when the cache is already authoritative (guest mode)
    /// and a fetch would be meaningless; the repository treats that as a
    /// defined no-op.
    async fn load_all(&self) -> Result<Option<StateSnapshot>, HabitError>;

    /// Creates a habit and returns it with its assigned id.
    async fn create_habit(&self, data: &NewHabit) -> Result<Habit, HabitError>;

    /// Applies a patch to the given habit and returns the updated entity.
    async fn update_habit(&self, current: &Habit, patch: &HabitPatch)
        -> Result<Habit, HabitError>;

    /// Deletes a habit, cascading to its completions first.
    async fn delete_habit(&self, id: &HabitId) -> Result<(), HabitError>;

    /// Records a completion for `(habit_id, date)` and returns it.
    async fn insert_completion(
        &self,
        habit_id: &HabitId,
        date: CalendarDate,
    ) -> Result<Completion, HabitError>;

    /// Removes an existing completion record.
    async fn remove_completion(&self, completion: &Completion) -> Result<(), HabitError>;

    /// Erases every habit and completion in the current scope.
    async fn clear_all(&self) -> Result<(), HabitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_backend_is_object_safe() {
        fn _accepts_dyn(_backend: &dyn StorageBackend) {}
    }
}
