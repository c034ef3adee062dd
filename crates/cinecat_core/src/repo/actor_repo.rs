//! Actor persistence on the catalog store.
//!
//! # Invariants
//! - `external_id` is unique when present; duplicates surface as
//!   `RepoError::ConstraintViolation`.
//! - Deleting an actor deletes every role they play.

use crate::model::actor::{Actor, ActorDraft, ActorId};
use crate::repo::{with_write_tx, RepoError, RepoResult, SqliteCatalogStore};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const ACTOR_SELECT_SQL: &str = "SELECT
    id,
    external_id,
    name,
    birth_date,
    birth_place,
    profile_url
FROM actor";

/// Write and single-row read contract for actors.
pub trait ActorRepository {
    /// Inserts a new actor and returns it with the assigned id.
    fn create_actor(&self, draft: &ActorDraft) -> RepoResult<Actor>;
    /// Loads one actor by id.
    fn get_actor(&self, id: ActorId) -> RepoResult<Option<Actor>>;
    /// Overwrites every mutable field of an existing actor.
    ///
    /// Returns `RepoError::NotFound` when `id` does not exist.
    fn update_actor(&self, id: ActorId, draft: &ActorDraft) -> RepoResult<Actor>;
    /// Deletes an actor; returns whether a row was removed.
    fn delete_actor(&self, id: ActorId) -> RepoResult<bool>;
}

impl ActorRepository for SqliteCatalogStore<'_> {
    fn create_actor(&self, draft: &ActorDraft) -> RepoResult<Actor> {
        draft.validate()?;

        with_write_tx(self.conn(), |tx| {
            tx.execute(
                "INSERT INTO actor (
                    external_id,
                    name,
                    birth_date,
                    birth_place,
                    profile_url
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    draft.external_id.as_deref(),
                    draft.name.as_str(),
                    draft.birth_date,
                    draft.birth_place.as_deref(),
                    draft.profile_url.as_deref(),
                ],
            )?;
            load_required_actor(tx, tx.last_insert_rowid())
        })
    }

    fn get_actor(&self, id: ActorId) -> RepoResult<Option<Actor>> {
        load_actor(self.conn(), id)
    }

    fn update_actor(&self, id: ActorId, draft: &ActorDraft) -> RepoResult<Actor> {
        draft.validate()?;

        with_write_tx(self.conn(), |tx| {
            let changed = tx.execute(
                "UPDATE actor
                 SET
                    external_id = ?1,
                    name = ?2,
                    birth_date = ?3,
                    birth_place = ?4,
                    profile_url = ?5
                 WHERE id = ?6;",
                params![
                    draft.external_id.as_deref(),
                    draft.name.as_str(),
                    draft.birth_date,
                    draft.birth_place.as_deref(),
                    draft.profile_url.as_deref(),
                    id,
                ],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound { entity: "actor", id });
            }
            load_required_actor(tx, id)
        })
    }

    fn delete_actor(&self, id: ActorId) -> RepoResult<bool> {
        let changed = self
            .conn()
            .execute("DELETE FROM actor WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

pub(crate) fn parse_actor_row(row: &Row<'_>) -> rusqlite::Result<Actor> {
    Ok(Actor {
        id: row.get("id")?,
        external_id: row.get("external_id")?,
        name: row.get("name")?,
        birth_date: row.get("birth_date")?,
        birth_place: row.get("birth_place")?,
        profile_url: row.get("profile_url")?,
    })
}

fn load_actor(conn: &Connection, id: ActorId) -> RepoResult<Option<Actor>> {
    let actor = conn
        .query_row(
            &format!("{ACTOR_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_actor_row,
        )
        .optional()?;
    Ok(actor)
}

fn load_required_actor(conn: &Connection, id: ActorId) -> RepoResult<Actor> {
    load_actor(conn, id)?.ok_or_else(|| {
        RepoError::InvalidData(format!("actor {id} missing after write"))
    })
}
