//! HabitKit - Habit and completion state engine.
//!
//! Maintains the canonical in-memory record of habits and their completions,
//! operating transparently in two modes: authenticated (remote store is the
//! source of truth) and guest (local-only, snapshotted on-device).

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
