//! Habit streak engine.
//!
//! Toggling a day flips its membership in `completed_dates` and moves the
//! streak one step in the same direction. The streak is a counter driven by
//! toggles; it is never recomputed from the completion history, and days
//! that pass without a toggle do not reset it.

use crate::models::Habit;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// The day was added and the streak incremented.
    Completed,
    /// The day was removed and the streak decremented (never below zero).
    Uncompleted,
}

/// Toggle completion of `habit` on `day`, returning the updated habit.
pub fn toggle(habit: &Habit, day: NaiveDate) -> (Habit, StreakChange) {
    let mut next = habit.clone();
    let change = if next.completed_dates.remove(&day) {
        next.streak = next.streak.saturating_sub(1);
        StreakChange::Uncompleted
    } else {
        next.completed_dates.insert(day);
        next.streak = next.streak.saturating_add(1);
        StreakChange::Completed
    };
    (next, change)
}
