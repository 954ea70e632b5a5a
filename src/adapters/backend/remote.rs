//! Remote storage strategy for authenticated sessions.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{CalendarDate, HabitError, HabitId, UserId};
use crate::domain::habit::{Completion, Habit, HabitPatch, NewHabit, StateSnapshot};
use crate::ports::{RemoteStore, RemoteStoreError, StorageBackend};

/// `StorageBackend` over the remote store, scoped to one user.
///
/// Constructed per operation with the user id the session oracle reported,
/// so a login or logout between operations is always honored. Ids are
/// server-assigned; nothing is reflected into the cache until the store
/// confirms the write.
pub struct RemoteBackend {
    store: Arc<dyn RemoteStore>,
    user_id: UserId,
}

impl RemoteBackend {
    /// Creates a backend scoped to the given user.
    pub fn new(store: Arc<dyn RemoteStore>, user_id: UserId) -> Self {
        Self { store, user_id }
    }
}

fn write_error(err: RemoteStoreError) -> HabitError {
    HabitError::persistence(err.to_string())
}

fn read_error(err: RemoteStoreError) -> HabitError {
    HabitError::load(err.to_string())
}

#[async_trait]
impl StorageBackend for RemoteBackend {
    async fn load_all(&self) -> Result<Option<StateSnapshot>, HabitError> {
        let habits = self
            .store
            .fetch_habits(&self.user_id)
            .await
            .map_err(read_error)?;
        let completions = self
            .store
            .fetch_completions(&self.user_id)
            .await
            .map_err(read_error)?;
        Ok(Some(StateSnapshot {
            habits,
            completions,
        }))
    }

    async fn create_habit(&self, data: &NewHabit) -> Result<Habit, HabitError> {
        self.store
            .insert_habit(&self.user_id, data)
            .await
            .map_err(write_error)
    }

    async fn update_habit(
        &self,
        current: &Habit,
        patch: &HabitPatch,
    ) -> Result<Habit, HabitError> {
        self.store
            .update_habit(&self.user_id, current.id(), patch)
            .await
            .map_err(|err| match err {
                RemoteStoreError::RowNotFound(_) => HabitError::not_found(current.id().clone()),
                other => write_error(other),
            })
    }

    async fn delete_habit(&self, id: &HabitId) -> Result<(), HabitError> {
        // Completions first: a failure between the two deletes must never
        // leave orphaned completion rows behind.
        self.store
            .delete_completions_for_habit(&self.user_id, id)
            .await
            .map_err(write_error)?;
        self.store
            .delete_habit(&self.user_id, id)
            .await
            .map_err(write_error)
    }

    async fn insert_completion(
        &self,
        habit_id: &HabitId,
        date: CalendarDate,
    ) -> Result<Completion, HabitError> {
        self.store
            .insert_completion(&self.user_id, habit_id, date)
            .await
            .map_err(write_error)
    }

    async fn remove_completion(&self, completion: &Completion) -> Result<(), HabitError> {
        self.store
            .delete_completion(&self.user_id, completion.id())
            .await
            .map_err(write_error)
    }

    async fn clear_all(&self) -> Result<(), HabitError> {
        self.store
            .delete_all_for_user(&self.user_id)
            .await
            .map_err(write_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::remote::InMemoryRemoteStore;
    use crate::domain::habit::Frequency;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn backend(store: &Arc<InMemoryRemoteStore>) -> RemoteBackend {
        RemoteBackend::new(store.clone() as Arc<dyn RemoteStore>, user())
    }

    #[tokio::test]
    async fn create_returns_server_assigned_id() {
        let store = Arc::new(InMemoryRemoteStore::new());
        let habit = backend(&store)
            .create_habit(&NewHabit::new("Read", Frequency::Daily))
            .await
            .unwrap();
        assert!(!habit.id().is_guest());
    }

    #[tokio::test]
    async fn update_of_unknown_habit_maps_to_not_found() {
        let store = Arc::new(InMemoryRemoteStore::new());
        let ghost = Habit::new(
            HabitId::new("missing").unwrap(),
            NewHabit::new("Ghost", Frequency::Daily),
            crate::domain::foundation::Timestamp::from_millis(0),
        )
        .unwrap();

        let result = backend(&store)
            .update_habit(&ghost, &HabitPatch::empty().with_name("Renamed"))
            .await;
        assert!(matches!(result, Err(HabitError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_cascades_completions_before_habit() {
        let store = Arc::new(InMemoryRemoteStore::new());
        let backend = backend(&store);

        let habit = backend
            .create_habit(&NewHabit::new("Read", Frequency::Daily))
            .await
            .unwrap();
        backend
            .insert_completion(habit.id(), "2024-01-01".parse().unwrap())
            .await
            .unwrap();

        backend.delete_habit(habit.id()).await.unwrap();

        let snapshot = backend.load_all().await.unwrap().unwrap();
        assert!(snapshot.habits.is_empty());
        assert!(snapshot.completions.is_empty());
    }

    #[tokio::test]
    async fn load_all_is_scoped_to_the_user() {
        let store = Arc::new(InMemoryRemoteStore::new());
        let mine = backend(&store);
        let theirs = RemoteBackend::new(
            store.clone() as Arc<dyn RemoteStore>,
            UserId::new("u2").unwrap(),
        );

        mine.create_habit(&NewHabit::new("Mine", Frequency::Daily))
            .await
            .unwrap();
        theirs
            .create_habit(&NewHabit::new("Theirs", Frequency::Daily))
            .await
            .unwrap();

        let snapshot = mine.load_all().await.unwrap().unwrap();
        assert_eq!(snapshot.habits.len(), 1);
        assert_eq!(snapshot.habits[0].name(), "Mine");
    }
}
