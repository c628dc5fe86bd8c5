use crate::models::{Dream, Goal, Habit};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub dream_count: usize,
    pub goal_count: usize,
    pub habit_count: usize,
    /// Goals at 100%
    pub completed_goals: usize,
    /// Mean goal progress rounded down, `None` without goals.
    pub average_progress: Option<u8>,
    pub habits_done_today: usize,
    pub best_streak: u32,
}

pub fn summarize(
    dreams: &[Dream],
    goals: &[Goal],
    habits: &[Habit],
    today: NaiveDate,
) -> DashboardSummary {
    DashboardSummary {
        dream_count: dreams.len(),
        goal_count: goals.len(),
        habit_count: habits.len(),
        completed_goals: goals.iter().filter(|g| g.is_complete()).count(),
        average_progress: average_progress(goals),
        habits_done_today: habits.iter().filter(|h| h.is_completed_on(today)).count(),
        best_streak: habits.iter().map(|h| h.streak).max().unwrap_or(0),
    }
}

fn average_progress(goals: &[Goal]) -> Option<u8> {
    let count = u64::try_from(goals.len()).ok().filter(|n| *n > 0)?;
    let total: u64 = goals.iter().map(|g| u64::from(g.progress)).sum();
    u8::try_from(total / count).ok()
}
