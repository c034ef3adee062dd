//! Relationship traversals over roles, genre membership and directors.
//!
//! # Responsibility
//! - One hardcoded join per use case; no dynamic query composition.
//! - Validate ids and year ranges at the boundary.
//!
//! # Invariants
//! - Traversals through `role` yield one row per role (or role pair) and are
//!   not deduplicated. The only exception is
//!   `films_of_actor_between_years`, which is `DISTINCT` on
//!   `(name, release_year)`.
//! - Row order is stable for an unmutated store (role id order, or film id
//!   order when no role is traversed).

use super::{collect_rows, ensure_positive_id, ensure_year_range};
use crate::model::actor::ActorId;
use crate::model::director::DirectorId;
use crate::model::film::{Film, FilmId};
use crate::model::genre::GenreId;
use crate::model::role::Role;
use crate::repo::film_repo::{attach_genre_ids, parse_film_row, FILM_SELECT_SQL};
use crate::repo::role_repo::{parse_role_row, ROLE_SELECT_SQL};
use crate::repo::{with_read_tx, RepoResult, SqliteCatalogStore};
use rusqlite::types::Value;
use rusqlite::vtab::array::Array;
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::rc::Rc;

/// `(film name, release year)` projection returned by film traversals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilmYear {
    pub name: String,
    pub release_year: i32,
}

impl FilmYear {
    pub fn new(name: impl Into<String>, release_year: i32) -> Self {
        Self {
            name: name.into(),
            release_year,
        }
    }
}

/// `(actor name, character)` projection for one role of a film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastEntry {
    pub actor_name: String,
    pub character: Option<String>,
}

/// Relationship traversal contract.
pub trait RelationQuery {
    /// Films belonging to any genre whose type is in `genre_types`.
    ///
    /// Each film appears once; an empty set yields no films. Any number of
    /// types is accepted: the set binds as one `rarray` parameter.
    fn films_by_genre_types(&self, genre_types: &BTreeSet<String>) -> RepoResult<Vec<Film>>;
    /// Films released in `start_year..=end_year`.
    fn films_released_between(&self, start_year: i32, end_year: i32) -> RepoResult<Vec<Film>>;
    /// One entry per role the actor plays.
    fn films_of_actor(&self, actor_id: ActorId) -> RepoResult<Vec<FilmYear>>;
    /// Names of actors with a role in both films, one per role pair.
    fn actors_in_films(&self, film_id_1: FilmId, film_id_2: FilmId) -> RepoResult<Vec<String>>;
    /// Films in which both actors have a role, one per role pair.
    fn films_of_two_actors(
        &self,
        actor_id_1: ActorId,
        actor_id_2: ActorId,
    ) -> RepoResult<Vec<FilmYear>>;
    /// Actor and character for every role of a film.
    fn cast_of_film(&self, film_id: FilmId) -> RepoResult<Vec<CastEntry>>;
    fn films_of_genre(&self, genre_id: GenreId) -> RepoResult<Vec<FilmYear>>;
    fn films_of_director(&self, director_id: DirectorId) -> RepoResult<Vec<FilmYear>>;
    /// Distinct films of an actor released in `start_year..=end_year`.
    fn films_of_actor_between_years(
        &self,
        start_year: i32,
        end_year: i32,
        actor_id: ActorId,
    ) -> RepoResult<Vec<FilmYear>>;
    fn roles_of_actor(&self, actor_id: ActorId) -> RepoResult<Vec<Role>>;
    fn roles_of_film(&self, film_id: FilmId) -> RepoResult<Vec<Role>>;
}

impl RelationQuery for SqliteCatalogStore<'_> {
    fn films_by_genre_types(&self, genre_types: &BTreeSet<String>) -> RepoResult<Vec<Film>> {
        if genre_types.is_empty() {
            return Ok(Vec::new());
        }
        let genre_types: Array = Rc::new(genre_types.iter().cloned().map(Value::from).collect());

        with_read_tx(self.conn(), |conn| {
            let mut films = collect_rows(
                conn,
                &format!(
                    "{FILM_SELECT_SQL}
                     WHERE EXISTS (
                        SELECT 1
                        FROM film_genre fg
                        INNER JOIN genre g ON g.id = fg.genre_id
                        WHERE fg.film_id = f.id
                          AND g.type IN rarray(?1)
                     )
                     ORDER BY f.id ASC;"
                ),
                [&genre_types],
                parse_film_row,
            )?;
            attach_genre_ids(conn, &mut films)?;
            Ok(films)
        })
    }

    fn films_released_between(&self, start_year: i32, end_year: i32) -> RepoResult<Vec<Film>> {
        ensure_year_range(start_year, end_year)?;

        with_read_tx(self.conn(), |conn| {
            let mut films = collect_rows(
                conn,
                &format!(
                    "{FILM_SELECT_SQL}
                     WHERE f.release_year BETWEEN ?1 AND ?2
                     ORDER BY f.id ASC;"
                ),
                params![start_year, end_year],
                parse_film_row,
            )?;
            attach_genre_ids(conn, &mut films)?;
            Ok(films)
        })
    }

    fn films_of_actor(&self, actor_id: ActorId) -> RepoResult<Vec<FilmYear>> {
        ensure_positive_id("actor_id", actor_id)?;
        collect_rows(
            self.conn(),
            "SELECT f.name, f.release_year
             FROM role r
             INNER JOIN film f ON f.id = r.film_id
             WHERE r.actor_id = ?1
             ORDER BY r.id ASC;",
            [actor_id],
            parse_film_year,
        )
    }

    fn actors_in_films(&self, film_id_1: FilmId, film_id_2: FilmId) -> RepoResult<Vec<String>> {
        ensure_positive_id("film_id_1", film_id_1)?;
        ensure_positive_id("film_id_2", film_id_2)?;
        collect_rows(
            self.conn(),
            "SELECT a.name
             FROM role r1
             INNER JOIN actor a ON a.id = r1.actor_id
             INNER JOIN role r2 ON r2.actor_id = a.id
             WHERE r1.film_id = ?1
               AND r2.film_id = ?2
             ORDER BY r1.id ASC, r2.id ASC;",
            [film_id_1, film_id_2],
            |row| row.get(0),
        )
    }

    fn films_of_two_actors(
        &self,
        actor_id_1: ActorId,
        actor_id_2: ActorId,
    ) -> RepoResult<Vec<FilmYear>> {
        ensure_positive_id("actor_id_1", actor_id_1)?;
        ensure_positive_id("actor_id_2", actor_id_2)?;
        collect_rows(
            self.conn(),
            "SELECT f.name, f.release_year
             FROM role r1
             INNER JOIN film f ON f.id = r1.film_id
             INNER JOIN role r2 ON r2.film_id = f.id
             WHERE r1.actor_id = ?1
               AND r2.actor_id = ?2
             ORDER BY r1.id ASC, r2.id ASC;",
            [actor_id_1, actor_id_2],
            parse_film_year,
        )
    }

    fn cast_of_film(&self, film_id: FilmId) -> RepoResult<Vec<CastEntry>> {
        ensure_positive_id("film_id", film_id)?;
        collect_rows(
            self.conn(),
            "SELECT a.name, r.character_name
             FROM role r
             INNER JOIN actor a ON a.id = r.actor_id
             WHERE r.film_id = ?1
             ORDER BY r.id ASC;",
            [film_id],
            |row| {
                Ok(CastEntry {
                    actor_name: row.get(0)?,
                    character: row.get(1)?,
                })
            },
        )
    }

    fn films_of_genre(&self, genre_id: GenreId) -> RepoResult<Vec<FilmYear>> {
        ensure_positive_id("genre_id", genre_id)?;
        collect_rows(
            self.conn(),
            "SELECT f.name, f.release_year
             FROM film_genre fg
             INNER JOIN film f ON f.id = fg.film_id
             WHERE fg.genre_id = ?1
             ORDER BY f.id ASC;",
            [genre_id],
            parse_film_year,
        )
    }

    fn films_of_director(&self, director_id: DirectorId) -> RepoResult<Vec<FilmYear>> {
        ensure_positive_id("director_id", director_id)?;
        collect_rows(
            self.conn(),
            "SELECT name, release_year
             FROM film
             WHERE director_id = ?1
             ORDER BY id ASC;",
            [director_id],
            parse_film_year,
        )
    }

    fn films_of_actor_between_years(
        &self,
        start_year: i32,
        end_year: i32,
        actor_id: ActorId,
    ) -> RepoResult<Vec<FilmYear>> {
        ensure_year_range(start_year, end_year)?;
        ensure_positive_id("actor_id", actor_id)?;
        collect_rows(
            self.conn(),
            "SELECT DISTINCT f.name, f.release_year
             FROM role r
             INNER JOIN film f ON f.id = r.film_id
             WHERE r.actor_id = ?3
               AND f.release_year BETWEEN ?1 AND ?2
             ORDER BY f.release_year ASC, f.name ASC;",
            params![start_year, end_year, actor_id],
            parse_film_year,
        )
    }

    fn roles_of_actor(&self, actor_id: ActorId) -> RepoResult<Vec<Role>> {
        ensure_positive_id("actor_id", actor_id)?;
        collect_rows(
            self.conn(),
            &format!("{ROLE_SELECT_SQL} WHERE actor_id = ?1 ORDER BY id ASC;"),
            [actor_id],
            parse_role_row,
        )
    }

    fn roles_of_film(&self, film_id: FilmId) -> RepoResult<Vec<Role>> {
        ensure_positive_id("film_id", film_id)?;
        collect_rows(
            self.conn(),
            &format!("{ROLE_SELECT_SQL} WHERE film_id = ?1 ORDER BY id ASC;"),
            [film_id],
            parse_role_row,
        )
    }
}

fn parse_film_year(row: &Row<'_>) -> rusqlite::Result<FilmYear> {
    Ok(FilmYear {
        name: row.get(0)?,
        release_year: row.get(1)?,
    })
}
