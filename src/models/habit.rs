use super::serde_compat::day_set;
use super::{EntityId, Record};
use crate::error::AppError;
use crate::validation::validate_title;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(AppError::InvalidInput {
                field: "frequency",
                reason: format!("'{other}' is not daily, weekly or monthly"),
            }),
        }
    }
}

/// A recurring action tracked per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub frequency: Frequency,
    pub created_at: DateTime<Utc>,
    /// Days on which the habit was marked complete.
    #[serde(default, deserialize_with = "day_set")]
    pub completed_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub streak: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewHabit {
    pub title: String,
    pub description: String,
    pub frequency: Frequency,
}

impl Habit {
    pub fn create(
        id: EntityId,
        created_at: DateTime<Utc>,
        draft: &NewHabit,
    ) -> Result<Self, AppError> {
        let title = validate_title(&draft.title)?;
        Ok(Self {
            id,
            title: title.to_string(),
            description: draft.description.clone(),
            frequency: draft.frequency,
            created_at,
            completed_dates: BTreeSet::new(),
            streak: 0,
        })
    }

    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.completed_dates.contains(&day)
    }
}

impl Record for Habit {
    const ENTITY: &'static str = "Habit";

    fn id(&self) -> EntityId {
        self.id
    }
}
