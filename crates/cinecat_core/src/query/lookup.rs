//! Paginated scans and exact-match attribute lookups.
//!
//! # Invariants
//! - Scans and multi-row lookups are ordered by primary key ascending.
//! - Matching is exact equality; no pattern or case folding.
//! - A page's `total_count` and `items` come from one read transaction, as do
//!   a film row and its genre set.

use super::collect_rows;
use super::page::{Page, PageRequest};
use crate::model::actor::Actor;
use crate::model::director::Director;
use crate::model::film::Film;
use crate::model::genre::Genre;
use crate::repo::actor_repo::{parse_actor_row, ACTOR_SELECT_SQL};
use crate::repo::director_repo::{parse_director_row, DIRECTOR_SELECT_SQL};
use crate::repo::film_repo::{attach_genre_ids, parse_film_row, FILM_SELECT_SQL};
use crate::repo::genre_repo::{parse_genre_row, GENRE_SELECT_SQL};
use crate::repo::{with_read_tx, RepoError, RepoResult, SqliteCatalogStore};
use chrono::NaiveDate;
use rusqlite::types::ToSql;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Actor attribute to match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorLookup {
    Name(String),
    BirthPlace(String),
    BirthDate(NaiveDate),
    ProfileUrl(String),
}

impl ActorLookup {
    fn predicate(&self) -> (&'static str, &dyn ToSql) {
        match self {
            Self::Name(value) => ("name", value as &dyn ToSql),
            Self::BirthPlace(value) => ("birth_place", value as &dyn ToSql),
            Self::BirthDate(value) => ("birth_date", value as &dyn ToSql),
            Self::ProfileUrl(value) => ("profile_url", value as &dyn ToSql),
        }
    }
}

/// Director attribute to match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorLookup {
    Name(String),
    BirthPlace(String),
    BirthDate(NaiveDate),
    ProfileUrl(String),
}

impl DirectorLookup {
    fn predicate(&self) -> (&'static str, &dyn ToSql) {
        match self {
            Self::Name(value) => ("name", value as &dyn ToSql),
            Self::BirthPlace(value) => ("birth_place", value as &dyn ToSql),
            Self::BirthDate(value) => ("birth_date", value as &dyn ToSql),
            Self::ProfileUrl(value) => ("profile_url", value as &dyn ToSql),
        }
    }
}

/// Film attribute to match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilmLookup {
    Name(String),
    ReleaseYear(i32),
    Rating(String),
    ProfileUrl(String),
    ShootLocation(String),
    Language(String),
    Synopsis(String),
    Country(String),
}

impl FilmLookup {
    fn predicate(&self) -> (&'static str, &dyn ToSql) {
        match self {
            Self::Name(value) => ("f.name", value as &dyn ToSql),
            Self::ReleaseYear(value) => ("f.release_year", value as &dyn ToSql),
            Self::Rating(value) => ("f.rating", value as &dyn ToSql),
            Self::ProfileUrl(value) => ("f.profile_url", value as &dyn ToSql),
            Self::ShootLocation(value) => ("f.shoot_location", value as &dyn ToSql),
            Self::Language(value) => ("f.language", value as &dyn ToSql),
            Self::Synopsis(value) => ("f.synopsis", value as &dyn ToSql),
            Self::Country(value) => ("f.country", value as &dyn ToSql),
        }
    }
}

/// Scan and lookup contract over catalog entities.
pub trait LookupQuery {
    fn list_actors(&self, request: PageRequest) -> RepoResult<Page<Actor>>;
    fn list_films(&self, request: PageRequest) -> RepoResult<Page<Film>>;
    fn list_directors(&self, request: PageRequest) -> RepoResult<Page<Director>>;
    fn list_genres(&self, request: PageRequest) -> RepoResult<Page<Genre>>;
    /// Every genre, unpaginated; the genre vocabulary is small.
    fn list_all_genres(&self) -> RepoResult<Vec<Genre>>;

    fn find_actors(&self, lookup: &ActorLookup) -> RepoResult<Vec<Actor>>;
    fn find_actor_by_external_id(&self, external_id: &str) -> RepoResult<Option<Actor>>;
    fn find_films(&self, lookup: &FilmLookup) -> RepoResult<Vec<Film>>;
    fn find_film_by_external_id(&self, external_id: &str) -> RepoResult<Option<Film>>;
    fn find_directors(&self, lookup: &DirectorLookup) -> RepoResult<Vec<Director>>;
    fn find_director_by_external_id(&self, external_id: &str) -> RepoResult<Option<Director>>;
    /// All genres whose type equals `kind`.
    fn find_genres_by_type(&self, kind: &str) -> RepoResult<Vec<Genre>>;
    /// Lowest-id genre whose type equals `kind`.
    fn find_genre_by_type(&self, kind: &str) -> RepoResult<Option<Genre>>;
}

impl LookupQuery for SqliteCatalogStore<'_> {
    fn list_actors(&self, request: PageRequest) -> RepoResult<Page<Actor>> {
        with_read_tx(self.conn(), |conn| {
            fetch_page(conn, "actor", ACTOR_SELECT_SQL, "id", request, parse_actor_row)
        })
    }

    fn list_films(&self, request: PageRequest) -> RepoResult<Page<Film>> {
        with_read_tx(self.conn(), |conn| {
            let mut page = fetch_page(
                conn,
                "film",
                FILM_SELECT_SQL,
                "f.id",
                request,
                parse_film_row,
            )?;
            attach_genre_ids(conn, &mut page.items)?;
            Ok(page)
        })
    }

    fn list_directors(&self, request: PageRequest) -> RepoResult<Page<Director>> {
        with_read_tx(self.conn(), |conn| {
            fetch_page(conn, "director", DIRECTOR_SELECT_SQL, "id", request, parse_director_row)
        })
    }

    fn list_genres(&self, request: PageRequest) -> RepoResult<Page<Genre>> {
        with_read_tx(self.conn(), |conn| {
            fetch_page(conn, "genre", GENRE_SELECT_SQL, "id", request, parse_genre_row)
        })
    }

    fn list_all_genres(&self) -> RepoResult<Vec<Genre>> {
        collect_rows(
            self.conn(),
            &format!("{GENRE_SELECT_SQL} ORDER BY id ASC;"),
            [],
            parse_genre_row,
        )
    }

    fn find_actors(&self, lookup: &ActorLookup) -> RepoResult<Vec<Actor>> {
        let (column, value) = lookup.predicate();
        collect_rows(
            self.conn(),
            &format!("{ACTOR_SELECT_SQL} WHERE {column} = ?1 ORDER BY id ASC;"),
            [value],
            parse_actor_row,
        )
    }

    fn find_actor_by_external_id(&self, external_id: &str) -> RepoResult<Option<Actor>> {
        let actor = self
            .conn()
            .query_row(
                &format!("{ACTOR_SELECT_SQL} WHERE external_id = ?1;"),
                [external_id],
                parse_actor_row,
            )
            .optional()?;
        Ok(actor)
    }

    fn find_films(&self, lookup: &FilmLookup) -> RepoResult<Vec<Film>> {
        let (column, value) = lookup.predicate();
        with_read_tx(self.conn(), |conn| {
            let mut films = collect_rows(
                conn,
                &format!("{FILM_SELECT_SQL} WHERE {column} = ?1 ORDER BY f.id ASC;"),
                [value],
                parse_film_row,
            )?;
            attach_genre_ids(conn, &mut films)?;
            Ok(films)
        })
    }

    fn find_film_by_external_id(&self, external_id: &str) -> RepoResult<Option<Film>> {
        with_read_tx(self.conn(), |conn| {
            let mut films = collect_rows(
                conn,
                &format!("{FILM_SELECT_SQL} WHERE f.external_id = ?1;"),
                [external_id],
                parse_film_row,
            )?;
            attach_genre_ids(conn, &mut films)?;
            Ok(films.pop())
        })
    }

    fn find_directors(&self, lookup: &DirectorLookup) -> RepoResult<Vec<Director>> {
        let (column, value) = lookup.predicate();
        collect_rows(
            self.conn(),
            &format!("{DIRECTOR_SELECT_SQL} WHERE {column} = ?1 ORDER BY id ASC;"),
            [value],
            parse_director_row,
        )
    }

    fn find_director_by_external_id(&self, external_id: &str) -> RepoResult<Option<Director>> {
        let director = self
            .conn()
            .query_row(
                &format!("{DIRECTOR_SELECT_SQL} WHERE external_id = ?1;"),
                [external_id],
                parse_director_row,
            )
            .optional()?;
        Ok(director)
    }

    fn find_genres_by_type(&self, kind: &str) -> RepoResult<Vec<Genre>> {
        collect_rows(
            self.conn(),
            &format!("{GENRE_SELECT_SQL} WHERE type = ?1 ORDER BY id ASC;"),
            [kind],
            parse_genre_row,
        )
    }

    fn find_genre_by_type(&self, kind: &str) -> RepoResult<Option<Genre>> {
        let genre = self
            .conn()
            .query_row(
                &format!("{GENRE_SELECT_SQL} WHERE type = ?1 ORDER BY id ASC LIMIT 1;"),
                [kind],
                parse_genre_row,
            )
            .optional()?;
        Ok(genre)
    }
}

/// Counts `table` and selects one page of it; callers hold the read
/// transaction.
fn fetch_page<T>(
    conn: &Connection,
    table: &'static str,
    select_sql: &str,
    key_column: &'static str,
    request: PageRequest,
    parse: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> RepoResult<Page<T>> {
    request.validate()?;

    let total: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })?;
    let total_count = u64::try_from(total)
        .map_err(|_| RepoError::InvalidData(format!("negative row count for `{table}`")))?;

    let items = collect_rows(
        conn,
        &format!("{select_sql} ORDER BY {key_column} ASC LIMIT ?1 OFFSET ?2;"),
        params![i64::from(request.size), request.offset()],
        parse,
    )?;
    Ok(Page::new(items, total_count, request))
}
