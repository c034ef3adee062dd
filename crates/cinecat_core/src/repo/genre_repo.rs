//! Genre persistence on the catalog store.

use crate::model::genre::{Genre, GenreDraft, GenreId};
use crate::repo::{RepoError, RepoResult, SqliteCatalogStore};
use rusqlite::{params, OptionalExtension, Row};

pub(crate) const GENRE_SELECT_SQL: &str = "SELECT id, type FROM genre";

/// Write and single-row read contract for genres.
pub trait GenreRepository {
    fn create_genre(&self, draft: &GenreDraft) -> RepoResult<Genre>;
    fn get_genre(&self, id: GenreId) -> RepoResult<Option<Genre>>;
    /// Returns `RepoError::NotFound` when `id` does not exist.
    fn update_genre(&self, id: GenreId, draft: &GenreDraft) -> RepoResult<Genre>;
    /// Deletes a genre and its film memberships; films are kept.
    fn delete_genre(&self, id: GenreId) -> RepoResult<bool>;
}

impl GenreRepository for SqliteCatalogStore<'_> {
    fn create_genre(&self, draft: &GenreDraft) -> RepoResult<Genre> {
        draft.validate()?;
        self.conn()
            .execute("INSERT INTO genre (type) VALUES (?1);", [draft.kind.as_str()])?;
        Ok(Genre {
            id: self.conn().last_insert_rowid(),
            kind: draft.kind.clone(),
        })
    }

    fn get_genre(&self, id: GenreId) -> RepoResult<Option<Genre>> {
        let genre = self
            .conn()
            .query_row(
                &format!("{GENRE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_genre_row,
            )
            .optional()?;
        Ok(genre)
    }

    fn update_genre(&self, id: GenreId, draft: &GenreDraft) -> RepoResult<Genre> {
        draft.validate()?;
        let changed = self.conn().execute(
            "UPDATE genre SET type = ?1 WHERE id = ?2;",
            params![draft.kind.as_str(), id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "genre", id });
        }
        Ok(Genre {
            id,
            kind: draft.kind.clone(),
        })
    }

    fn delete_genre(&self, id: GenreId) -> RepoResult<bool> {
        let changed = self
            .conn()
            .execute("DELETE FROM genre WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

pub(crate) fn parse_genre_row(row: &Row<'_>) -> rusqlite::Result<Genre> {
    Ok(Genre {
        id: row.get("id")?,
        kind: row.get("type")?,
    })
}
