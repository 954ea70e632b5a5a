//! Raw-data snapshot of the engine's state.

use serde::{Deserialize, Serialize};

use super::{Completion, Habit};

/// The persistable portion of in-memory state: habits and completions only.
///
/// Derived data (progress buckets) is always recomputed, never serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub habits: Vec<Habit>,
    pub completions: Vec<Completion>,
}

impl StateSnapshot {
    /// An empty snapshot, the initial state of a fresh process.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the snapshot holds no data.
    pub fn is_empty(&self) -> bool {
        self.habits.is_empty() && self.completions.is_empty()
    }
}
