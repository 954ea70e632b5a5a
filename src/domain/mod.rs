//! Domain layer - value objects, aggregates, and pure computation.

pub mod foundation;
pub mod habit;
pub mod progress;
