//! Role records: the actor/film junction carrying the character name.

use super::actor::ActorId;
use super::film::FilmId;
use super::{require_reference, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned role id.
pub type RoleId = i64;

/// Write payload for creating or overwriting a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDraft {
    pub character: Option<String>,
    pub actor_id: ActorId,
    pub film_id: FilmId,
}

impl RoleDraft {
    pub fn new(actor_id: ActorId, film_id: FilmId, character: Option<String>) -> Self {
        Self {
            character,
            actor_id,
            film_id,
        }
    }

    /// Checks structural validity before persistence.
    ///
    /// Existence of the referenced actor and film is checked by the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_reference("role", "actor_id", self.actor_id)?;
        require_reference("role", "film_id", self.film_id)
    }
}

/// Stored role.
///
/// `actor_id` and `film_id` are the foreign-key columns themselves, so they
/// always match the referenced rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub character: Option<String>,
    pub actor_id: ActorId,
    pub film_id: FilmId,
}

impl Role {
    pub fn draft(&self) -> RoleDraft {
        RoleDraft::new(self.actor_id, self.film_id, self.character.clone())
    }
}
