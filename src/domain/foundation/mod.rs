//! Shared domain primitives: identifiers, timestamps, calendar dates, errors.

mod calendar_date;
mod errors;
mod ids;
mod timestamp;

pub use calendar_date::CalendarDate;
pub use errors::HabitError;
pub use ids::{CompletionId, HabitId, UserId};
pub use timestamp::Timestamp;
