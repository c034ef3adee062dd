//! Genre records.

use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned genre id.
pub type GenreId = i64;

/// Write payload for creating or renaming a genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreDraft {
    /// Serialized as `type` to match the catalog vocabulary.
    #[serde(rename = "type")]
    pub kind: String,
}

impl GenreDraft {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("genre", "type", &self.kind)
    }
}

/// Stored genre.
///
/// `kind` is expected to be unique for lookups, but the store does not
/// enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Genre {
    pub fn draft(&self) -> GenreDraft {
        GenreDraft::new(self.kind.clone())
    }
}
