pub mod dream;
pub mod goal;
pub mod habit;
mod serde_compat;

pub use dream::{Dream, NewDream};
pub use goal::{Goal, GoalPatch, NewGoal};
pub use habit::{Frequency, Habit, NewHabit};

/// Record identifier, unique within its collection.
pub type EntityId = i64;

/// A record stored in an entity collection.
pub trait Record {
    /// Human-readable entity name used in errors and logs.
    const ENTITY: &'static str;

    fn id(&self) -> EntityId;
}
