use crate::clock::Clock;
use crate::collection::Collection;
use crate::constants::{DREAMS_KEY, GOALS_KEY, HABITS_KEY};
use crate::error::AppError;
use crate::forms::Form;
use crate::inspiration::{InspirationSource, StaticInspiration};
use crate::models::{Dream, EntityId, Goal, GoalPatch, Habit, NewDream, NewGoal, NewHabit};
use crate::stats::{summarize, DashboardSummary};
use crate::store::KeyValueStore;
use crate::streak::{self, StreakChange};
use log::{debug, info};
use std::rc::Rc;

/// The dashboard session: the three collections plus transient UI state.
///
/// Every mutating operation writes the affected collection back to its
/// store slot before returning.
pub struct Dashboard {
    dreams: Collection<Dream>,
    goals: Collection<Goal>,
    habits: Collection<Habit>,
    clock: Box<dyn Clock>,
    inspiration_source: Box<dyn InspirationSource>,
    inspiration: Option<String>,
    dream_form: Form<NewDream>,
    goal_form: Form<NewGoal>,
    habit_form: Form<NewHabit>,
}

impl Dashboard {
    pub fn new(
        dreams: Collection<Dream>,
        goals: Collection<Goal>,
        habits: Collection<Habit>,
        clock: Box<dyn Clock>,
        inspiration_source: Box<dyn InspirationSource>,
    ) -> Self {
        Self {
            dreams,
            goals,
            habits,
            clock,
            inspiration_source,
            inspiration: None,
            dream_form: Form::default(),
            goal_form: Form::default(),
            habit_form: Form::default(),
        }
    }

    /// Load all three collections from their well-known keys in `store`.
    pub fn open(store: &Rc<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        let dashboard = Self::new(
            Collection::open(Rc::clone(store), DREAMS_KEY),
            Collection::open(Rc::clone(store), GOALS_KEY),
            Collection::open(Rc::clone(store), HABITS_KEY),
            clock,
            Box::new(StaticInspiration::new(rand::thread_rng())),
        );
        info!(
            "Loaded {} dreams, {} goals, {} habits",
            dashboard.dreams.len(),
            dashboard.goals.len(),
            dashboard.habits.len()
        );
        dashboard
    }

    pub fn dreams(&self) -> &[Dream] {
        self.dreams.items()
    }

    pub fn goals(&self) -> &[Goal] {
        self.goals.items()
    }

    pub fn habits(&self) -> &[Habit] {
        self.habits.items()
    }

    /// True when every collection's stored copy matches memory.
    pub fn is_in_sync(&self) -> bool {
        self.dreams.is_in_sync() && self.goals.is_in_sync() && self.habits.is_in_sync()
    }

    // ── Dreams ─────────────────────────────────────────────────────────

    pub fn add_dream(&mut self, draft: &NewDream) -> Result<Dream, AppError> {
        let now = self.clock.now();
        self.dreams.insert_with(now, |id| Dream::create(id, now, draft))
    }

    pub fn replace_dream(&mut self, id: EntityId, draft: &NewDream) -> Result<Dream, AppError> {
        self.dreams.replace_with(id, |dream| dream.replaced_by(draft))
    }

    pub fn delete_dream(&mut self, id: EntityId) -> bool {
        self.dreams.remove(id)
    }

    // ── Goals ──────────────────────────────────────────────────────────

    pub fn add_goal(&mut self, draft: &NewGoal) -> Result<Goal, AppError> {
        let now = self.clock.now();
        self.goals.insert_with(now, |id| Goal::create(id, now, draft))
    }

    pub fn update_goal(&mut self, id: EntityId, patch: &GoalPatch) -> Result<Goal, AppError> {
        self.goals.replace_with(id, |goal| goal.patched(patch))
    }

    pub fn set_goal_progress(&mut self, id: EntityId, progress: u8) -> Result<Goal, AppError> {
        self.update_goal(id, &GoalPatch::progress(progress))
    }

    pub fn delete_goal(&mut self, id: EntityId) -> bool {
        self.goals.remove(id)
    }

    // ── Habits ─────────────────────────────────────────────────────────

    pub fn add_habit(&mut self, draft: &NewHabit) -> Result<Habit, AppError> {
        let now = self.clock.now();
        self.habits.insert_with(now, |id| Habit::create(id, now, draft))
    }

    /// Flip today's completion of habit `id`.
    pub fn toggle_habit(&mut self, id: EntityId) -> Result<Habit, AppError> {
        let today = self.clock.today();
        let mut change = None;
        let habit = self.habits.replace_with(id, |habit| {
            let (next, c) = streak::toggle(habit, today);
            change = Some(c);
            Ok(next)
        })?;
        if let Some(c) = change {
            debug!(
                "Habit {id} {} on {today}, streak {}",
                match c {
                    StreakChange::Completed => "completed",
                    StreakChange::Uncompleted => "uncompleted",
                },
                habit.streak
            );
        }
        Ok(habit)
    }

    pub fn is_habit_done_today(&self, id: EntityId) -> bool {
        let today = self.clock.today();
        self.habits.get(id).is_some_and(|h| h.is_completed_on(today))
    }

    pub fn delete_habit(&mut self, id: EntityId) -> bool {
        self.habits.remove(id)
    }

    // ── Creation forms ─────────────────────────────────────────────────

    pub fn dream_form(&mut self) -> &mut Form<NewDream> {
        &mut self.dream_form
    }

    pub fn goal_form(&mut self) -> &mut Form<NewGoal> {
        &mut self.goal_form
    }

    pub fn habit_form(&mut self) -> &mut Form<NewHabit> {
        &mut self.habit_form
    }

    /// Add a dream from the form draft. A rejected draft is a silent no-op.
    pub fn submit_dream_form(&mut self) -> Option<Dream> {
        let now = self.clock.now();
        let dreams = &mut self.dreams;
        let result = self
            .dream_form
            .submit(|draft| dreams.insert_with(now, |id| Dream::create(id, now, draft)));
        swallow_rejection("dream", result)
    }

    pub fn submit_goal_form(&mut self) -> Option<Goal> {
        let now = self.clock.now();
        let goals = &mut self.goals;
        let result = self
            .goal_form
            .submit(|draft| goals.insert_with(now, |id| Goal::create(id, now, draft)));
        swallow_rejection("goal", result)
    }

    pub fn submit_habit_form(&mut self) -> Option<Habit> {
        let now = self.clock.now();
        let habits = &mut self.habits;
        let result = self
            .habit_form
            .submit(|draft| habits.insert_with(now, |id| Habit::create(id, now, draft)));
        swallow_rejection("habit", result)
    }

    // ── Inspiration ────────────────────────────────────────────────────

    /// Draw a new quote and reveal it.
    pub fn inspire(&mut self) -> &str {
        self.inspiration
            .insert(self.inspiration_source.next_inspiration())
            .as_str()
    }

    /// The revealed quote, if the panel is showing.
    pub fn inspiration(&self) -> Option<&str> {
        self.inspiration.as_deref()
    }

    pub fn dismiss_inspiration(&mut self) {
        self.inspiration = None;
    }

    pub fn summary(&self) -> DashboardSummary {
        summarize(
            self.dreams(),
            self.goals(),
            self.habits(),
            self.clock.today(),
        )
    }
}

fn swallow_rejection<T>(entity: &str, result: Result<T, AppError>) -> Option<T> {
    match result {
        Ok(record) => Some(record),
        Err(e) => {
            debug!("Ignoring {entity} draft: {e}");
            None
        }
    }
}
