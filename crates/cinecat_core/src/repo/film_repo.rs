//! Film persistence on the catalog store, including genre membership.
//!
//! # Responsibility
//! - Insert/overwrite film rows together with their `film_genre` set.
//! - Rebuild `Film::genre_ids` from `film_genre` on every read.
//!
//! # Invariants
//! - Film row and genre set are written, and read back, in one immediate
//!   transaction.
//! - Every read of a film loads its row and genre set in one transaction.
//! - Membership is a set: `(film_id, genre_id)` is the table primary key.
//! - Unknown `director_id`/genre ids are rejected as constraint violations.

use crate::model::film::{Film, FilmDraft, FilmId};
use crate::model::genre::GenreId;
use crate::repo::{with_read_tx, with_write_tx, RepoError, RepoResult, SqliteCatalogStore};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;

pub(crate) const FILM_SELECT_SQL: &str = "SELECT
    f.id AS id,
    f.external_id AS external_id,
    f.name AS name,
    f.release_year AS release_year,
    f.rating AS rating,
    f.profile_url AS profile_url,
    f.shoot_location AS shoot_location,
    f.language AS language,
    f.synopsis AS synopsis,
    f.country AS country,
    f.director_id AS director_id
FROM film f";

/// Write and single-row read contract for films.
pub trait FilmRepository {
    /// Inserts a film and its genre set.
    fn create_film(&self, draft: &FilmDraft) -> RepoResult<Film>;
    fn get_film(&self, id: FilmId) -> RepoResult<Option<Film>>;
    /// Overwrites every mutable field, director and genre set included.
    ///
    /// Returns `RepoError::NotFound` when `id` does not exist; nothing is
    /// written in that case.
    fn update_film(&self, id: FilmId, draft: &FilmDraft) -> RepoResult<Film>;
    /// Deletes a film together with its roles and genre memberships.
    fn delete_film(&self, id: FilmId) -> RepoResult<bool>;
}

impl FilmRepository for SqliteCatalogStore<'_> {
    fn create_film(&self, draft: &FilmDraft) -> RepoResult<Film> {
        draft.validate()?;

        with_write_tx(self.conn(), |tx| {
            tx.execute(
                "INSERT INTO film (
                    external_id,
                    name,
                    release_year,
                    rating,
                    profile_url,
                    shoot_location,
                    language,
                    synopsis,
                    country,
                    director_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
                params![
                    draft.external_id.as_str(),
                    draft.name.as_str(),
                    draft.release_year,
                    draft.rating.as_deref(),
                    draft.profile_url.as_str(),
                    draft.shoot_location.as_str(),
                    draft.language.as_str(),
                    draft.synopsis.as_str(),
                    draft.country.as_str(),
                    draft.director_id,
                ],
            )?;
            let id = tx.last_insert_rowid();
            insert_genre_links(tx, id, &draft.genre_ids)?;
            load_required_film(tx, id)
        })
    }

    fn get_film(&self, id: FilmId) -> RepoResult<Option<Film>> {
        with_read_tx(self.conn(), |conn| load_film(conn, id))
    }

    fn update_film(&self, id: FilmId, draft: &FilmDraft) -> RepoResult<Film> {
        draft.validate()?;

        with_write_tx(self.conn(), |tx| {
            let changed = tx.execute(
                "UPDATE film
                 SET
                    external_id = ?1,
                    name = ?2,
                    release_year = ?3,
                    rating = ?4,
                    profile_url = ?5,
                    shoot_location = ?6,
                    language = ?7,
                    synopsis = ?8,
                    country = ?9,
                    director_id = ?10
                 WHERE id = ?11;",
                params![
                    draft.external_id.as_str(),
                    draft.name.as_str(),
                    draft.release_year,
                    draft.rating.as_deref(),
                    draft.profile_url.as_str(),
                    draft.shoot_location.as_str(),
                    draft.language.as_str(),
                    draft.synopsis.as_str(),
                    draft.country.as_str(),
                    draft.director_id,
                    id,
                ],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound { entity: "film", id });
            }

            tx.execute("DELETE FROM film_genre WHERE film_id = ?1;", [id])?;
            insert_genre_links(tx, id, &draft.genre_ids)?;
            load_required_film(tx, id)
        })
    }

    fn delete_film(&self, id: FilmId) -> RepoResult<bool> {
        let changed = self
            .conn()
            .execute("DELETE FROM film WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

/// Parses the scalar film columns; `genre_ids` is left empty.
///
/// Callers fill it with `attach_genre_ids`.
pub(crate) fn parse_film_row(row: &Row<'_>) -> rusqlite::Result<Film> {
    Ok(Film {
        id: row.get("id")?,
        external_id: row.get("external_id")?,
        name: row.get("name")?,
        release_year: row.get("release_year")?,
        rating: row.get("rating")?,
        profile_url: row.get("profile_url")?,
        shoot_location: row.get("shoot_location")?,
        language: row.get("language")?,
        synopsis: row.get("synopsis")?,
        country: row.get("country")?,
        director_id: row.get("director_id")?,
        genre_ids: BTreeSet::new(),
    })
}

/// Loads the genre set of every film in `films`.
pub(crate) fn attach_genre_ids(conn: &Connection, films: &mut [Film]) -> RepoResult<()> {
    let mut stmt = conn.prepare_cached("SELECT genre_id FROM film_genre WHERE film_id = ?1;")?;
    for film in films.iter_mut() {
        let genre_ids = stmt
            .query_map([film.id], |row| row.get::<_, GenreId>(0))?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        film.genre_ids = genre_ids;
    }
    Ok(())
}

fn insert_genre_links(
    conn: &Connection,
    film_id: FilmId,
    genre_ids: &BTreeSet<GenreId>,
) -> RepoResult<()> {
    let mut stmt =
        conn.prepare_cached("INSERT INTO film_genre (film_id, genre_id) VALUES (?1, ?2);")?;
    for genre_id in genre_ids {
        stmt.execute(params![film_id, genre_id])?;
    }
    Ok(())
}

fn load_film(conn: &Connection, id: FilmId) -> RepoResult<Option<Film>> {
    let film = conn
        .query_row(
            &format!("{FILM_SELECT_SQL} WHERE f.id = ?1;"),
            [id],
            parse_film_row,
        )
        .optional()?;

    match film {
        Some(film) => {
            let mut films = [film];
            attach_genre_ids(conn, &mut films)?;
            let [film] = films;
            Ok(Some(film))
        }
        None => Ok(None),
    }
}

fn load_required_film(conn: &Connection, id: FilmId) -> RepoResult<Film> {
    load_film(conn, id)?
        .ok_or_else(|| RepoError::InvalidData(format!("film {id} missing after write")))
}
