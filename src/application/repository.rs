//! Mode-aware habit repository.
//!
//! The state engine behind the UI: owns the in-memory cache of habits and
//! completions, consults the session oracle on every operation, and routes
//! writes through one of two storage backends. The cache is only mutated
//! after the backing store confirms a write, so a failed mutation always
//! leaves visible state exactly as it was.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;

use crate::adapters::backend::{LocalBackend, RemoteBackend};
use crate::domain::foundation::{CalendarDate, HabitError, HabitId};
use crate::domain::habit::{Completion, Habit, HabitPatch, NewHabit, StateSnapshot};
use crate::domain::progress::{compute_progress, ProgressSummary};
use crate::ports::{LocalStore, RemoteStore, SessionOracle, SessionState, StorageBackend};

use super::PersistenceBridge;

/// The habit/completion state engine.
///
/// All mutations are async (they may await the backing store); reads answer
/// synchronously from the in-memory cache and never block on I/O. The cache
/// lock is never held across an await.
pub struct HabitRepository {
    session: Arc<dyn SessionOracle>,
    remote: Arc<dyn RemoteStore>,
    bridge: PersistenceBridge,
    cache: RwLock<StateSnapshot>,
    revision: watch::Sender<u64>,
}

impl HabitRepository {
    /// Creates a repository with an empty cache.
    pub fn new(
        session: Arc<dyn SessionOracle>,
        remote: Arc<dyn RemoteStore>,
        local: Arc<dyn LocalStore>,
    ) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            session,
            remote,
            bridge: PersistenceBridge::new(local),
            cache: RwLock::new(StateSnapshot::empty()),
            revision,
        }
    }

    /// Creates a repository hydrated from the last persisted snapshot.
    ///
    /// A missing or corrupt snapshot yields an empty cache; startup never
    /// fails on restore.
    pub async fn restore(
        session: Arc<dyn SessionOracle>,
        remote: Arc<dyn RemoteStore>,
        local: Arc<dyn LocalStore>,
    ) -> Self {
        let repository = Self::new(session, remote, local);
        let snapshot = repository.bridge.restore().await;
        if !snapshot.is_empty() {
            tracing::debug!(
                habits = snapshot.habits.len(),
                completions = snapshot.completions.len(),
                "restored state snapshot"
            );
            *repository.write_cache() = snapshot;
        }
        repository
    }

    /// Picks the storage strategy for this operation from the session mode.
    fn backend(&self) -> Box<dyn StorageBackend> {
        match self.session.current() {
            SessionState::Guest => Box::new(LocalBackend::new()),
            SessionState::Authenticated(user_id) => {
                Box::new(RemoteBackend::new(self.remote.clone(), user_id))
            }
        }
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, StateSnapshot> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, StateSnapshot> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshots the cache to the local store, best-effort, and bumps the
    /// revision watched by subscribers.
    async fn reflect_change(&self) {
        let snapshot = self.read_cache().clone();
        if let Err(err) = self.bridge.persist(&snapshot).await {
            tracing::warn!(error = %err, "state snapshot persist failed");
        }
        self.revision.send_modify(|rev| *rev += 1);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Refreshes the cache from the backing store.
    ///
    /// Authenticated: fetches the full habit and completion sets for the
    /// current user and replaces the cache wholesale (last fetch wins).
    /// Guest: defined no-op, the cache is already authoritative.
    ///
    /// # Errors
    ///
    /// `Load` on transport failure; the cache is left unchanged, never
    /// cleared.
    pub async fn load_all(&self) -> Result<(), HabitError> {
        let Some(snapshot) = self.backend().load_all().await? else {
            return Ok(());
        };
        *self.write_cache() = snapshot;
        self.reflect_change().await;
        Ok(())
    }

    /// Creates a habit and makes it visible to readers.
    ///
    /// Authenticated mode writes to the remote store and only then inserts
    /// the server-assigned row into the cache; guest mode mints a local id
    /// immediately. New habits land at the front, matching the store's
    /// newest-first ordering.
    ///
    /// # Errors
    ///
    /// `Persistence` if the remote write fails (cache untouched);
    /// `Validation` on a defensive field check.
    pub async fn create_habit(&self, data: NewHabit) -> Result<Habit, HabitError> {
        let habit = self.backend().create_habit(&data).await?;
        self.write_cache().habits.insert(0, habit.clone());
        self.reflect_change().await;
        Ok(habit)
    }

    /// Applies a partial update to a habit.
    ///
    /// Fields absent from the patch are unchanged; optional fields support
    /// an explicit clear distinct from omission.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id is not in the current scope; `Persistence` if
    /// the remote write fails (cache untouched).
    pub async fn update_habit(&self, id: &HabitId, patch: HabitPatch) -> Result<Habit, HabitError> {
        let current = self
            .habit(id)
            .ok_or_else(|| HabitError::not_found(id.clone()))?;

        let updated = self.backend().update_habit(&current, &patch).await?;

        {
            let mut cache = self.write_cache();
            if let Some(slot) = cache.habits.iter_mut().find(|h| h.id() == id) {
                *slot = updated.clone();
            }
        }
        self.reflect_change().await;
        Ok(updated)
    }

    /// Deletes a habit and every completion referencing it.
    ///
    /// The cascade is one logical operation: in authenticated mode both
    /// remote deletes must succeed before the cache is touched, so a
    /// partial failure surfaces as an error without cache/store divergence.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id is not in the current scope; `Persistence` on
    /// remote failure.
    pub async fn delete_habit(&self, id: &HabitId) -> Result<(), HabitError> {
        if self.habit(id).is_none() {
            return Err(HabitError::not_found(id.clone()));
        }

        self.backend().delete_habit(id).await?;

        {
            let mut cache = self.write_cache();
            cache.habits.retain(|h| h.id() != id);
            cache.completions.retain(|c| c.habit_id() != id);
        }
        self.reflect_change().await;
        Ok(())
    }

    /// Toggles the completion state of `(habit_id, date)`.
    ///
    /// Read-then-act: if a completion exists it is removed, otherwise one is
    /// inserted. Returns the new completed state. Calling twice returns to
    /// the original state; at most one record ever exists per pair.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown habit; `Persistence` if the remote write
    /// fails, in which case the cache is not updated.
    pub async fn toggle_completion(
        &self,
        habit_id: &HabitId,
        date: CalendarDate,
    ) -> Result<bool, HabitError> {
        if self.habit(habit_id).is_none() {
            return Err(HabitError::not_found(habit_id.clone()));
        }

        let existing = self
            .read_cache()
            .completions
            .iter()
            .find(|c| c.matches(habit_id, date))
            .cloned();

        let completed = match existing {
            Some(completion) => {
                self.backend().remove_completion(&completion).await?;
                self.write_cache()
                    .completions
                    .retain(|c| c.id() != completion.id());
                false
            }
            None => {
                let completion = self.backend().insert_completion(habit_id, date).await?;
                self.write_cache().completions.push(completion);
                true
            }
        };

        self.reflect_change().await;
        Ok(completed)
    }

    /// Erases all habits and completions in the current scope.
    ///
    /// Store deletes run to completion before the cache is cleared, so a
    /// failure leaves both sides consistent. Authenticated mode erases the
    /// account's remote rows; logout hygiene that should keep the account
    /// intact flips the session to guest before clearing.
    pub async fn clear_all(&self) -> Result<(), HabitError> {
        self.backend().clear_all().await?;
        *self.write_cache() = StateSnapshot::empty();
        self.reflect_change().await;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reads (synchronous over the cache)
    // ─────────────────────────────────────────────────────────────────────

    /// Looks up a habit by id.
    pub fn habit(&self, id: &HabitId) -> Option<Habit> {
        self.read_cache().habits.iter().find(|h| h.id() == id).cloned()
    }

    /// Active habits, in cache order (newest first).
    pub fn active_habits(&self) -> Vec<Habit> {
        self.read_cache()
            .habits
            .iter()
            .filter(|h| h.is_active())
            .cloned()
            .collect()
    }

    /// Every habit, active or not.
    pub fn all_habits(&self) -> Vec<Habit> {
        self.read_cache().habits.clone()
    }

    /// Every completion record.
    pub fn completions(&self) -> Vec<Completion> {
        self.read_cache().completions.clone()
    }

    /// Whether `(habit_id, date)` is currently completed.
    pub fn is_completed_on(&self, habit_id: &HabitId, date: CalendarDate) -> bool {
        self.read_cache()
            .completions
            .iter()
            .any(|c| c.matches(habit_id, date))
    }

    /// Progress buckets for the given reference date.
    pub fn progress(&self, reference: CalendarDate) -> ProgressSummary {
        let cache = self.read_cache();
        compute_progress(&cache.habits, &cache.completions, reference)
    }

    /// Subscribes to state changes.
    ///
    /// The watched value is a revision counter bumped after every visible
    /// state change; the UI re-reads through the synchronous accessors when
    /// it observes a new revision.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
