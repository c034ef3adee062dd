//! Director persistence on the catalog store.
//!
//! Deleting a director keeps their films and clears `film.director_id`.

use crate::model::director::{Director, DirectorDraft, DirectorId};
use crate::repo::{with_write_tx, RepoError, RepoResult, SqliteCatalogStore};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const DIRECTOR_SELECT_SQL: &str = "SELECT
    id,
    external_id,
    name,
    birth_date,
    birth_place,
    profile_url
FROM director";

/// Write and single-row read contract for directors.
pub trait DirectorRepository {
    fn create_director(&self, draft: &DirectorDraft) -> RepoResult<Director>;
    fn get_director(&self, id: DirectorId) -> RepoResult<Option<Director>>;
    /// Returns `RepoError::NotFound` when `id` does not exist.
    fn update_director(&self, id: DirectorId, draft: &DirectorDraft) -> RepoResult<Director>;
    fn delete_director(&self, id: DirectorId) -> RepoResult<bool>;
}

impl DirectorRepository for SqliteCatalogStore<'_> {
    fn create_director(&self, draft: &DirectorDraft) -> RepoResult<Director> {
        draft.validate()?;

        with_write_tx(self.conn(), |tx| {
            tx.execute(
                "INSERT INTO director (
                    external_id,
                    name,
                    birth_date,
                    birth_place,
                    profile_url
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    draft.external_id.as_str(),
                    draft.name.as_str(),
                    draft.birth_date,
                    draft.birth_place.as_str(),
                    draft.profile_url.as_str(),
                ],
            )?;
            load_required_director(tx, tx.last_insert_rowid())
        })
    }

    fn get_director(&self, id: DirectorId) -> RepoResult<Option<Director>> {
        load_director(self.conn(), id)
    }

    fn update_director(&self, id: DirectorId, draft: &DirectorDraft) -> RepoResult<Director> {
        draft.validate()?;

        with_write_tx(self.conn(), |tx| {
            let changed = tx.execute(
                "UPDATE director
                 SET
                    external_id = ?1,
                    name = ?2,
                    birth_date = ?3,
                    birth_place = ?4,
                    profile_url = ?5
                 WHERE id = ?6;",
                params![
                    draft.external_id.as_str(),
                    draft.name.as_str(),
                    draft.birth_date,
                    draft.birth_place.as_str(),
                    draft.profile_url.as_str(),
                    id,
                ],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound {
                    entity: "director",
                    id,
                });
            }
            load_required_director(tx, id)
        })
    }

    fn delete_director(&self, id: DirectorId) -> RepoResult<bool> {
        let changed = self
            .conn()
            .execute("DELETE FROM director WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

pub(crate) fn parse_director_row(row: &Row<'_>) -> rusqlite::Result<Director> {
    Ok(Director {
        id: row.get("id")?,
        external_id: row.get("external_id")?,
        name: row.get("name")?,
        birth_date: row.get("birth_date")?,
        birth_place: row.get("birth_place")?,
        profile_url: row.get("profile_url")?,
    })
}

fn load_director(conn: &Connection, id: DirectorId) -> RepoResult<Option<Director>> {
    let director = conn
        .query_row(
            &format!("{DIRECTOR_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_director_row,
        )
        .optional()?;
    Ok(director)
}

fn load_required_director(conn: &Connection, id: DirectorId) -> RepoResult<Director> {
    load_director(conn, id)?
        .ok_or_else(|| RepoError::InvalidData(format!("director {id} missing after write")))
}
