//! Director records.
//!
//! Films point at their director through `Film::director_id`; there is no
//! owned film collection on this side.

use super::{require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned director id.
pub type DirectorId = i64;

/// Write payload for creating or overwriting a director.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorDraft {
    pub external_id: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub profile_url: String,
}

impl DirectorDraft {
    /// Checks structural validity before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("director", "external_id", &self.external_id)?;
        require_text("director", "name", &self.name)
    }
}

/// Stored director.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    pub id: DirectorId,
    pub external_id: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub profile_url: String,
}

impl Director {
    pub fn from_draft(id: DirectorId, draft: DirectorDraft) -> Self {
        Self {
            id,
            external_id: draft.external_id,
            name: draft.name,
            birth_date: draft.birth_date,
            birth_place: draft.birth_place,
            profile_url: draft.profile_url,
        }
    }

    pub fn draft(&self) -> DirectorDraft {
        DirectorDraft {
            external_id: self.external_id.clone(),
            name: self.name.clone(),
            birth_date: self.birth_date,
            birth_place: self.birth_place.clone(),
            profile_url: self.profile_url.clone(),
        }
    }
}
