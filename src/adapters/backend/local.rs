//! Local storage strategy for guest sessions.

use async_trait::async_trait;

use crate::domain::foundation::{CalendarDate, CompletionId, HabitError, HabitId, Timestamp};
use crate::domain::habit::{Completion, Habit, HabitPatch, NewHabit, StateSnapshot};
use crate::ports::StorageBackend;

/// `StorageBackend` for guest mode.
///
/// The repository's in-memory cache is the store in this mode, so writes
/// only mint ids, validate, and build entities; the repository reflecting
/// the result into the cache is what makes it durable (via the persistence
/// bridge). Ids carry the `guest-` namespace and never collide in format
/// with server-assigned ids.
#[derive(Debug, Default)]
pub struct LocalBackend;

impl LocalBackend {
    /// Creates the guest backend.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    async fn load_all(&self) -> Result<Option<StateSnapshot>, HabitError> {
        // The cache is already authoritative; nothing to fetch.
        Ok(None)
    }

    async fn create_habit(&self, data: &NewHabit) -> Result<Habit, HabitError> {
        Habit::new(HabitId::mint_guest(), data.clone(), Timestamp::now())
    }

    async fn update_habit(
        &self,
        current: &Habit,
        patch: &HabitPatch,
    ) -> Result<Habit, HabitError> {
        current.apply_patch(patch)
    }

    async fn delete_habit(&self, _id: &HabitId) -> Result<(), HabitError> {
        Ok(())
    }

    async fn insert_completion(
        &self,
        habit_id: &HabitId,
        date: CalendarDate,
    ) -> Result<Completion, HabitError> {
        Ok(Completion::new(
            CompletionId::mint_guest(),
            habit_id.clone(),
            date,
            Timestamp::now(),
        ))
    }

    async fn remove_completion(&self, _completion: &Completion) -> Result<(), HabitError> {
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), HabitError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::habit::Frequency;

    #[tokio::test]
    async fn create_mints_guest_namespaced_id() {
        let backend = LocalBackend::new();
        let habit = backend
            .create_habit(&NewHabit::new("Read", Frequency::Daily))
            .await
            .unwrap();
        assert!(habit.id().is_guest());
        assert!(habit.is_active());
    }

    #[tokio::test]
    async fn load_all_is_a_no_op() {
        let backend = LocalBackend::new();
        assert_eq!(backend.load_all().await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_applies_patch_locally() {
        let backend = LocalBackend::new();
        let habit = backend
            .create_habit(&NewHabit::new("Read", Frequency::Daily))
            .await
            .unwrap();
        let updated = backend
            .update_habit(&habit, &HabitPatch::empty().with_name("Read more"))
            .await
            .unwrap();
        assert_eq!(updated.name(), "Read more");
        assert_eq!(updated.id(), habit.id());
    }

    #[tokio::test]
    async fn completion_ids_are_guest_namespaced() {
        let backend = LocalBackend::new();
        let completion = backend
            .insert_completion(&HabitId::mint_guest(), "2024-01-01".parse().unwrap())
            .await
            .unwrap();
        assert!(completion.id().is_guest());
    }
}
