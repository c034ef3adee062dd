//! Read-only catalog queries.
//!
//! # Responsibility
//! - Paginated scans and exact-match attribute lookups (`lookup`).
//! - Fixed-shape relationship traversals over roles, genres and directors
//!   (`relation`).
//! - Reject malformed arguments before any SQL runs.
//!
//! # Invariants
//! - Queries never write.
//! - Ids must be positive and year ranges ordered (`start <= end`); anything
//!   else is `RepoError::InvalidArgument`.

use crate::repo::{RepoError, RepoResult};
use rusqlite::{Connection, Params, Row};

pub mod lookup;
pub mod page;
pub mod relation;

/// Rejects non-positive ids.
pub fn ensure_positive_id(field: &str, id: i64) -> RepoResult<()> {
    if id <= 0 {
        return Err(RepoError::InvalidArgument(format!(
            "{field} must be a positive id, got {id}"
        )));
    }
    Ok(())
}

/// Rejects inverted year ranges. Both bounds are inclusive.
pub fn ensure_year_range(start_year: i32, end_year: i32) -> RepoResult<()> {
    if start_year > end_year {
        return Err(RepoError::InvalidArgument(format!(
            "start_year {start_year} is after end_year {end_year}"
        )));
    }
    Ok(())
}

pub(crate) fn collect_rows<T, P, F>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: F,
) -> RepoResult<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, parse)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::{ensure_positive_id, ensure_year_range};
    use crate::repo::RepoError;

    #[test]
    fn positive_ids_pass_and_others_fail() {
        assert!(ensure_positive_id("actor_id", 1).is_ok());
        assert!(matches!(
            ensure_positive_id("actor_id", 0),
            Err(RepoError::InvalidArgument(_))
        ));
        assert!(matches!(
            ensure_positive_id("film_id", -4),
            Err(RepoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn single_year_range_is_valid() {
        assert!(ensure_year_range(1999, 1999).is_ok());
        let err = ensure_year_range(2001, 1999).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: start_year 2001 is after end_year 1999"
        );
    }
}
