//! Windowed progress aggregation.
//!
//! Pure over its inputs: the caller supplies the reference date, so the same
//! inputs always produce the same buckets. Only active habits participate,
//! partitioned by cadence.

use serde::Serialize;

use crate::domain::foundation::CalendarDate;
use crate::domain::habit::{Completion, Frequency, Habit};

/// Aggregate completion ratio for one cadence over its window.
///
/// Derived data; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressBucket {
    pub completed: u32,
    pub total: u32,
    pub percentage: f64,
}

impl ProgressBucket {
    /// Builds a bucket from counts. An empty bucket is 0%, never a division
    /// by zero.
    pub fn from_counts(completed: u32, total: u32) -> Self {
        debug_assert!(completed <= total);
        let percentage = if total > 0 {
            f64::from(completed) / f64::from(total) * 100.0
        } else {
            0.0
        };
        Self {
            completed,
            total,
            percentage,
        }
    }
}

/// Progress buckets for all three cadences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub daily: ProgressBucket,
    pub weekly: ProgressBucket,
    pub monthly: ProgressBucket,
}

/// Computes completion progress for the given reference date.
///
/// - daily: completed iff a completion's date equals `reference`
/// - weekly: completed iff at least one completion falls in
///   `[ISO-Monday(reference), reference]`
/// - monthly: completed iff at least one completion falls in
///   `[first-of-month(reference), reference]`
///
/// A habit counts once per bucket regardless of how many days in the window
/// it was marked. Habits with zero completions contribute to `total` only.
pub fn compute_progress(
    habits: &[Habit],
    completions: &[Completion],
    reference: CalendarDate,
) -> ProgressSummary {
    ProgressSummary {
        daily: bucket_for(habits, completions, Frequency::Daily, reference, reference),
        weekly: bucket_for(
            habits,
            completions,
            Frequency::Weekly,
            reference.week_start(),
            reference,
        ),
        monthly: bucket_for(
            habits,
            completions,
            Frequency::Monthly,
            reference.month_start(),
            reference,
        ),
    }
}

fn bucket_for(
    habits: &[Habit],
    completions: &[Completion],
    frequency: Frequency,
    window_start: CalendarDate,
    window_end: CalendarDate,
) -> ProgressBucket {
    let mut total = 0u32;
    let mut completed = 0u32;
    for habit in habits {
        if !habit.is_active() || habit.frequency() != frequency {
            continue;
        }
        total += 1;
        let done = completions.iter().any(|c| {
            c.habit_id() == habit.id() && c.date().is_within(window_start, window_end)
        });
        if done {
            completed += 1;
        }
    }
    ProgressBucket::from_counts(completed, total)
}
