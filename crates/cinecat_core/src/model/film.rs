//! Film records.
//!
//! # Invariants
//! - `genre_ids` is a set; membership order carries no meaning.
//! - `director_id`, when set, references an existing director.

use super::director::DirectorId;
use super::genre::GenreId;
use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Store-assigned film id.
pub type FilmId = i64;

const MIN_RELEASE_YEAR: i32 = 1;
const MAX_RELEASE_YEAR: i32 = 9999;

/// Write payload for creating or overwriting a film.
///
/// Updating a film replaces its director and whole genre set with the values
/// carried here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmDraft {
    pub external_id: String,
    pub name: String,
    pub release_year: i32,
    pub rating: Option<String>,
    pub profile_url: String,
    pub shoot_location: String,
    pub language: String,
    pub synopsis: String,
    pub country: String,
    pub director_id: Option<DirectorId>,
    #[serde(default)]
    pub genre_ids: BTreeSet<GenreId>,
}

impl FilmDraft {
    /// Creates a draft with identity fields set and descriptive text empty.
    pub fn new(external_id: impl Into<String>, name: impl Into<String>, release_year: i32) -> Self {
        Self {
            external_id: external_id.into(),
            name: name.into(),
            release_year,
            ..Self::default()
        }
    }

    /// Checks structural validity before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("film", "external_id", &self.external_id)?;
        require_text("film", "name", &self.name)?;
        if !(MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&self.release_year) {
            return Err(ValidationError::ReleaseYearOutOfRange(self.release_year));
        }
        Ok(())
    }
}

/// Stored film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: FilmId,
    pub external_id: String,
    pub name: String,
    pub release_year: i32,
    pub rating: Option<String>,
    pub profile_url: String,
    pub shoot_location: String,
    pub language: String,
    pub synopsis: String,
    pub country: String,
    pub director_id: Option<DirectorId>,
    pub genre_ids: BTreeSet<GenreId>,
}

impl Film {
    pub fn from_draft(id: FilmId, draft: FilmDraft) -> Self {
        Self {
            id,
            external_id: draft.external_id,
            name: draft.name,
            release_year: draft.release_year,
            rating: draft.rating,
            profile_url: draft.profile_url,
            shoot_location: draft.shoot_location,
            language: draft.language,
            synopsis: draft.synopsis,
            country: draft.country,
            director_id: draft.director_id,
            genre_ids: draft.genre_ids,
        }
    }

    pub fn draft(&self) -> FilmDraft {
        FilmDraft {
            external_id: self.external_id.clone(),
            name: self.name.clone(),
            release_year: self.release_year,
            rating: self.rating.clone(),
            profile_url: self.profile_url.clone(),
            shoot_location: self.shoot_location.clone(),
            language: self.language.clone(),
            synopsis: self.synopsis.clone(),
            country: self.country.clone(),
            director_id: self.director_id,
            genre_ids: self.genre_ids.clone(),
        }
    }
}
