//! Actor records.

use super::{require_optional_text, require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned actor id.
pub type ActorId = i64;

/// Write payload for creating or overwriting an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorDraft {
    /// External catalog id (e.g. `nm0000158`); unique once assigned.
    pub external_id: Option<String>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub profile_url: Option<String>,
}

impl ActorDraft {
    /// Creates a draft with only the name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            external_id: None,
            name: name.into(),
            birth_date: None,
            birth_place: None,
            profile_url: None,
        }
    }

    /// Checks structural validity before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("actor", "name", &self.name)?;
        require_optional_text("actor", "external_id", self.external_id.as_deref())
    }
}

/// Stored actor.
///
/// Roles played are not embedded; query them with `roles_of_actor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub external_id: Option<String>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub profile_url: Option<String>,
}

impl Actor {
    /// Attaches a store-assigned id to a draft.
    pub fn from_draft(id: ActorId, draft: ActorDraft) -> Self {
        Self {
            id,
            external_id: draft.external_id,
            name: draft.name,
            birth_date: draft.birth_date,
            birth_place: draft.birth_place,
            profile_url: draft.profile_url,
        }
    }

    /// Returns every mutable field as a draft.
    pub fn draft(&self) -> ActorDraft {
        ActorDraft {
            external_id: self.external_id.clone(),
            name: self.name.clone(),
            birth_date: self.birth_date,
            birth_place: self.birth_place.clone(),
            profile_url: self.profile_url.clone(),
        }
    }
}
