//! Application layer: the mode-aware engine and the persistence bridge.

mod persistence_bridge;
mod repository;

pub use persistence_bridge::{PersistenceBridge, SNAPSHOT_KEY};
pub use repository::HabitRepository;
