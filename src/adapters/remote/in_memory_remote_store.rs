//! In-memory remote store.
//!
//! A user-scoped fake of the remote relational store: server-side id
//! minting, newest-first fetch ordering, and the unique
//! `(user, habit, date)` completion constraint. Useful for testing and
//! development.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::foundation::{
    CalendarDate, CompletionId, HabitError, HabitId, Timestamp, UserId,
};
use crate::domain::habit::{Completion, Habit, HabitPatch, NewHabit};
use crate::ports::{RemoteStore, RemoteStoreError};

struct Row<T> {
    user_id: UserId,
    seq: u64,
    entity: T,
}

#[derive(Default)]
struct Tables {
    habits: Vec<Row<Habit>>,
    completions: Vec<Row<Completion>>,
}

/// In-memory implementation of the remote store port.
#[derive(Clone, Default)]
pub struct InMemoryRemoteStore {
    tables: Arc<RwLock<Tables>>,
    seq: Arc<AtomicU64>,
}

impl InMemoryRemoteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Total habit rows across all users.
    pub async fn habit_count(&self) -> usize {
        self.tables.read().await.habits.len()
    }

    /// Total completion rows across all users.
    pub async fn completion_count(&self) -> usize {
        self.tables.read().await.completions.len()
    }
}

fn reject(err: HabitError) -> RemoteStoreError {
    RemoteStoreError::Rejected(err.to_string())
}

#[async_trait]
impl RemoteStore for InMemoryRemoteStore {
    async fn fetch_habits(&self, user_id: &UserId) -> Result<Vec<Habit>, RemoteStoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<(u64, Habit)> = tables
            .habits
            .iter()
            .filter(|row| &row.user_id == user_id)
            .map(|row| (row.seq, row.entity.clone()))
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(rows.into_iter().map(|(_, habit)| habit).collect())
    }

    async fn fetch_completions(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Completion>, RemoteStoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<(u64, Completion)> = tables
            .completions
            .iter()
            .filter(|row| &row.user_id == user_id)
            .map(|row| (row.seq, row.entity.clone()))
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(rows.into_iter().map(|(_, completion)| completion).collect())
    }

    async fn insert_habit(
        &self,
        user_id: &UserId,
        data: &NewHabit,
    ) -> Result<Habit, RemoteStoreError> {
        let id = HabitId::new(Uuid::new_v4().to_string()).map_err(reject)?;
        let habit = Habit::new(id, data.clone(), Timestamp::now()).map_err(reject)?;

        let mut tables = self.tables.write().await;
        tables.habits.push(Row {
            user_id: user_id.clone(),
            seq: self.next_seq(),
            entity: habit.clone(),
        });
        Ok(habit)
    }

    async fn update_habit(
        &self,
        user_id: &UserId,
        id: &HabitId,
        patch: &HabitPatch,
    ) -> Result<Habit, RemoteStoreError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .habits
            .iter_mut()
            .find(|row| &row.user_id == user_id && row.entity.id() == id)
            .ok_or_else(|| RemoteStoreError::RowNotFound(id.to_string()))?;

        let updated = row.entity.apply_patch(patch).map_err(reject)?;
        row.entity = updated.clone();
        Ok(updated)
    }

    async fn delete_habit(&self, user_id: &UserId, id: &HabitId) -> Result<(), RemoteStoreError> {
        let mut tables = self.tables.write().await;
        tables
            .habits
            .retain(|row| !(&row.user_id == user_id && row.entity.id() == id));
        Ok(())
    }

    async fn delete_completions_for_habit(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
    ) -> Result<(), RemoteStoreError> {
        let mut tables = self.tables.write().await;
        tables
            .completions
            .retain(|row| !(&row.user_id == user_id && row.entity.habit_id() == habit_id));
        Ok(())
    }

    async fn insert_completion(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        date: CalendarDate,
    ) -> Result<Completion, RemoteStoreError> {
        let mut tables = self.tables.write().await;

        // Unique constraint on (user, habit, date), as the real schema has.
        let duplicate = tables
            .completions
            .iter()
            .any(|row| &row.user_id == user_id && row.entity.matches(habit_id, date));
        if duplicate {
            return Err(RemoteStoreError::Rejected(format!(
                "completion already exists for habit {habit_id} on {date}"
            )));
        }

        let id = CompletionId::new(Uuid::new_v4().to_string()).map_err(reject)?;
        let completion = Completion::new(id, habit_id.clone(), date, Timestamp::now());
        tables.completions.push(Row {
            user_id: user_id.clone(),
            seq: self.next_seq(),
            entity: completion.clone(),
        });
        Ok(completion)
    }

    async fn delete_completion(
        &self,
        user_id: &UserId,
        id: &CompletionId,
    ) -> Result<(), RemoteStoreError> {
        let mut tables = self.tables.write().await;
        tables
            .completions
            .retain(|row| !(&row.user_id == user_id && row.entity.id() == id));
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<(), RemoteStoreError> {
        let mut tables = self.tables.write().await;
        tables.completions.retain(|row| &row.user_id != user_id);
        tables.habits.retain(|row| &row.user_id != user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::habit::Frequency;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn new_habit(name: &str) -> NewHabit {
        NewHabit::new(name, Frequency::Daily)
    }

    #[tokio::test]
    async fn fetch_returns_newest_first() {
        let store = InMemoryRemoteStore::new();
        let u = user("u1");
        store.insert_habit(&u, &new_habit("first")).await.unwrap();
        store.insert_habit(&u, &new_habit("second")).await.unwrap();

        let habits = store.fetch_habits(&u).await.unwrap();
        assert_eq!(habits[0].name(), "second");
        assert_eq!(habits[1].name(), "first");
    }

    #[tokio::test]
    async fn rows_are_scoped_by_user() {
        let store = InMemoryRemoteStore::new();
        store.insert_habit(&user("u1"), &new_habit("mine")).await.unwrap();
        store.insert_habit(&user("u2"), &new_habit("theirs")).await.unwrap();

        let habits = store.fetch_habits(&user("u1")).await.unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].name(), "mine");
    }

    #[tokio::test]
    async fn duplicate_completion_is_rejected() {
        let store = InMemoryRemoteStore::new();
        let u = user("u1");
        let habit = store.insert_habit(&u, &new_habit("Read")).await.unwrap();
        let date: CalendarDate = "2024-01-01".parse().unwrap();

        store.insert_completion(&u, habit.id(), date).await.unwrap();
        let second = store.insert_completion(&u, habit.id(), date).await;
        assert!(matches!(second, Err(RemoteStoreError::Rejected(_))));
        assert_eq!(store.completion_count().await, 1);
    }

    #[tokio::test]
    async fn update_in_another_users_scope_is_row_not_found() {
        let store = InMemoryRemoteStore::new();
        let habit = store.insert_habit(&user("u1"), &new_habit("Read")).await.unwrap();

        let result = store
            .update_habit(&user("u2"), habit.id(), &HabitPatch::empty().with_name("X"))
            .await;
        assert!(matches!(result, Err(RemoteStoreError::RowNotFound(_))));
    }

    #[tokio::test]
    async fn delete_all_leaves_other_users_untouched() {
        let store = InMemoryRemoteStore::new();
        let u1 = user("u1");
        let u2 = user("u2");
        let h1 = store.insert_habit(&u1, &new_habit("mine")).await.unwrap();
        store.insert_habit(&u2, &new_habit("theirs")).await.unwrap();
        store
            .insert_completion(&u1, h1.id(), "2024-01-01".parse().unwrap())
            .await
            .unwrap();

        store.delete_all_for_user(&u1).await.unwrap();

        assert!(store.fetch_habits(&u1).await.unwrap().is_empty());
        assert!(store.fetch_completions(&u1).await.unwrap().is_empty());
        assert_eq!(store.fetch_habits(&u2).await.unwrap().len(), 1);
    }
}
