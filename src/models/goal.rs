use super::serde_compat::{blank_date, clamped_progress};
use super::{EntityId, Record};
use crate::constants::MAX_PROGRESS;
use crate::error::AppError;
use crate::validation::validate_title;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A target with a completion percentage and an optional deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "blank_date")]
    pub deadline: Option<NaiveDate>,
    /// Percent complete, always within 0..=100.
    #[serde(default, deserialize_with = "clamped_progress")]
    pub progress: u8,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGoal {
    pub title: String,
    pub description: String,
    pub deadline: Option<NaiveDate>,
}

/// Partial update of a goal. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the deadline.
    pub deadline: Option<Option<NaiveDate>>,
    pub progress: Option<u8>,
}

impl GoalPatch {
    pub fn progress(progress: u8) -> Self {
        Self {
            progress: Some(progress),
            ..Self::default()
        }
    }
}

impl Goal {
    /// New goals always start at 0% progress.
    pub fn create(
        id: EntityId,
        created_at: DateTime<Utc>,
        draft: &NewGoal,
    ) -> Result<Self, AppError> {
        let title = validate_title(&draft.title)?;
        Ok(Self {
            id,
            title: title.to_string(),
            description: draft.description.clone(),
            deadline: draft.deadline,
            progress: 0,
            created_at,
        })
    }

    /// Copy of this goal with the patch applied.
    ///
    /// Progress comes from a bounded input control and is clamped rather
    /// than rejected.
    pub fn patched(&self, patch: &GoalPatch) -> Result<Self, AppError> {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = validate_title(title)?.to_string();
        }
        if let Some(description) = &patch.description {
            next.description.clone_from(description);
        }
        if let Some(deadline) = patch.deadline {
            next.deadline = deadline;
        }
        if let Some(progress) = patch.progress {
            if progress > MAX_PROGRESS {
                log::debug!("Clamping progress {progress} of goal {} to {MAX_PROGRESS}", self.id);
            }
            next.progress = progress.min(MAX_PROGRESS);
        }
        Ok(next)
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= MAX_PROGRESS
    }
}

impl Record for Goal {
    const ENTITY: &'static str = "Goal";

    fn id(&self) -> EntityId {
        self.id
    }
}
