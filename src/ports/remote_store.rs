//! Remote store port.
//!
//! Row-oriented CRUD over the `habits` and `completions` collections, scoped
//! by user. Transport, retries, and timeouts are the adapter's concern; the
//! engine only sees rows or structured errors.

use async_trait::async_trait;

use crate::domain::foundation::{CalendarDate, CompletionId, HabitId, UserId};
use crate::domain::habit::{Completion, Habit, HabitPatch, NewHabit};

/// Errors surfaced by the remote store adapter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteStoreError {
    #[error("Row not found: {0}")]
    RowNotFound(String),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Port onto the remote relational store.
///
/// All operations are scoped to a user; implementations must never return or
/// mutate rows belonging to anyone else. Fetches return rows ordered by
/// creation time, newest first.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches all habits for the user, newest first.
    async fn fetch_habits(&self, user_id: &UserId) -> Result<Vec<Habit>, RemoteStoreError>;

    /// Fetches all completions for the user, newest first.
    async fn fetch_completions(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Completion>, RemoteStoreError>;

    /// Inserts a habit row and returns it with its server-assigned id.
    async fn insert_habit(
        &self,
        user_id: &UserId,
        data: &NewHabit,
    ) -> Result<Habit, RemoteStoreError>;

    /// Applies a partial update and returns the updated row.
    ///
    /// # Errors
    ///
    /// `RowNotFound` if the habit does not exist in the user's scope.
    async fn update_habit(
        &self,
        user_id: &UserId,
        id: &HabitId,
        patch: &HabitPatch,
    ) -> Result<Habit, RemoteStoreError>;

    /// Deletes a habit row. Deleting a missing row is not an error.
    async fn delete_habit(&self, user_id: &UserId, id: &HabitId) -> Result<(), RemoteStoreError>;

    /// Deletes every completion referencing the habit.
    async fn delete_completions_for_habit(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
    ) -> Result<(), RemoteStoreError>;

    /// Inserts a completion row and returns it with its server-assigned id.
    ///
    /// # Errors
    ///
    /// `Rejected` if a row for the same `(habit_id, date)` already exists;
    /// the store enforces the uniqueness constraint.
    async fn insert_completion(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        date: CalendarDate,
    ) -> Result<Completion, RemoteStoreError>;

    /// Deletes a completion row by id.
    async fn delete_completion(
        &self,
        user_id: &UserId,
        id: &CompletionId,
    ) -> Result<(), RemoteStoreError>;

    /// Deletes every habit and completion in the user's scope.
    ///
    /// Completions are removed before habits, preserving referential
    /// integrity if the operation is interrupted.
    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<(), RemoteStoreError>;
}
