use super::serde_compat::blank_string;
use super::{EntityId, Record};
use crate::error::AppError;
use crate::validation::{normalize_image, validate_title};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An aspirational note, optionally illustrated by an image URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dream {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "blank_string")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating or replacing a dream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDream {
    pub title: String,
    pub description: String,
    /// Blank means no image.
    pub image: String,
}

impl Dream {
    pub fn create(
        id: EntityId,
        created_at: DateTime<Utc>,
        draft: &NewDream,
    ) -> Result<Self, AppError> {
        let title = validate_title(&draft.title)?;
        Ok(Self {
            id,
            title: title.to_string(),
            description: draft.description.clone(),
            image: normalize_image(Some(&draft.image)),
            created_at,
        })
    }

    /// Whole-record replacement. Identity and creation time are kept.
    pub fn replaced_by(&self, draft: &NewDream) -> Result<Self, AppError> {
        Self::create(self.id, self.created_at, draft)
    }
}

impl Record for Dream {
    const ENTITY: &'static str = "Dream";

    fn id(&self) -> EntityId {
        self.id
    }
}
