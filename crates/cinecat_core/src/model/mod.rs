//! Catalog entity model.
//!
//! # Responsibility
//! - Define the stored records (`Actor`, `Film`, `Director`, `Genre`, `Role`)
//!   and their write payloads (`*Draft`).
//! - Provide structural validation run before every write.
//!
//! # Invariants
//! - Surrogate ids are assigned by the store and never carried by drafts.
//! - Relationships are plain foreign-key ids; nothing here loads related rows.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod actor;
pub mod director;
pub mod film;
pub mod genre;
pub mod role;

/// Structural problem found in a draft before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty or whitespace only.
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
    /// Film release year outside `1..=9999`.
    ReleaseYearOutOfRange(i32),
    /// Foreign-key field does not hold a positive id.
    NonPositiveReference {
        entity: &'static str,
        field: &'static str,
        value: i64,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity}.{field} must not be blank")
            }
            Self::ReleaseYearOutOfRange(year) => {
                write!(f, "film.release_year out of range: {year}")
            }
            Self::NonPositiveReference {
                entity,
                field,
                value,
            } => write!(f, "{entity}.{field} must be a positive id, got {value}"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { entity, field });
    }
    Ok(())
}

pub(crate) fn require_optional_text(
    entity: &'static str,
    field: &'static str,
    value: Option<&str>,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => require_text(entity, field, value),
        None => Ok(()),
    }
}

pub(crate) fn require_reference(
    entity: &'static str,
    field: &'static str,
    value: i64,
) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveReference {
            entity,
            field,
            value,
        });
    }
    Ok(())
}
