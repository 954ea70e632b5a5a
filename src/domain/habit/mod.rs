//! Habit aggregate and its satellite value objects.

mod completion;
mod frequency;
mod habit;
mod patch;
mod snapshot;

pub use completion::Completion;
pub use frequency::Frequency;
pub use habit::{Habit, NewHabit, MAX_NAME_LENGTH, MAX_NOTES_LENGTH};
pub use patch::{FieldPatch, HabitPatch};
pub use snapshot::StateSnapshot;
