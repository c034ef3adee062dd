//! Catalog service facade.
//!
//! # Invariants
//! - Single-row reads and updates report a missing id as `Ok(None)`.
//! - Deleting a missing id succeeds without effect.
//! - Constraint and argument failures keep their own `CatalogError` variant
//!   so callers can tell them apart from storage faults.

use crate::model::actor::{Actor, ActorDraft, ActorId};
use crate::model::director::{Director, DirectorDraft, DirectorId};
use crate::model::film::{Film, FilmDraft, FilmId};
use crate::model::genre::{Genre, GenreDraft, GenreId};
use crate::model::role::{Role, RoleDraft, RoleId};
use crate::model::ValidationError;
use crate::query::ensure_positive_id;
use crate::query::lookup::{ActorLookup, DirectorLookup, FilmLookup};
use crate::query::page::{Page, PageRequest};
use crate::query::relation::{CastEntry, FilmYear};
use crate::repo::{CatalogStore, RepoError, RepoResult};
use log::{info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error surfaced by catalog use-cases.
#[derive(Debug)]
pub enum CatalogError {
    /// Malformed id, year range or page request.
    InvalidArgument(String),
    /// Uniqueness or referential-integrity breach; the write was not applied.
    ConstraintViolation(String),
    /// Payload failed structural validation; the write was not applied.
    Validation(ValidationError),
    /// Any other persistence failure.
    Repo(RepoError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::ConstraintViolation(message) => write!(f, "constraint violation: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::InvalidArgument(message) => Self::InvalidArgument(message),
            RepoError::ConstraintViolation(message) => Self::ConstraintViolation(message),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Catalog facade over any `CatalogStore`.
pub struct CatalogService<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // Actors

    pub fn list_actors(&self, request: PageRequest) -> CatalogResult<Page<Actor>> {
        Ok(self.store.list_actors(request)?)
    }

    pub fn get_actor(&self, id: ActorId) -> CatalogResult<Option<Actor>> {
        ensure_positive_id("actor_id", id)?;
        Ok(self.store.get_actor(id)?)
    }

    pub fn create_actor(&self, draft: &ActorDraft) -> CatalogResult<Actor> {
        let actor = logged_write("actor_create", None, self.store.create_actor(draft))?;
        info!("event=actor_create module=catalog status=ok id={}", actor.id);
        Ok(actor)
    }

    /// Overwrites an actor; `Ok(None)` when `id` does not exist.
    pub fn update_actor(&self, id: ActorId, draft: &ActorDraft) -> CatalogResult<Option<Actor>> {
        ensure_positive_id("actor_id", id)?;
        absent_on_not_found(logged_write(
            "actor_update",
            Some(id),
            self.store.update_actor(id, draft),
        ))
    }

    /// Deletes an actor and their roles.
    pub fn delete_actor(&self, id: ActorId) -> CatalogResult<()> {
        ensure_positive_id("actor_id", id)?;
        logged_delete("actor_delete", id, self.store.delete_actor(id))
    }

    pub fn find_actors(&self, lookup: &ActorLookup) -> CatalogResult<Vec<Actor>> {
        Ok(self.store.find_actors(lookup)?)
    }

    pub fn find_actor_by_external_id(&self, external_id: &str) -> CatalogResult<Option<Actor>> {
        Ok(self.store.find_actor_by_external_id(external_id)?)
    }

    // Films

    pub fn list_films(&self, request: PageRequest) -> CatalogResult<Page<Film>> {
        Ok(self.store.list_films(request)?)
    }

    pub fn get_film(&self, id: FilmId) -> CatalogResult<Option<Film>> {
        ensure_positive_id("film_id", id)?;
        Ok(self.store.get_film(id)?)
    }

    pub fn create_film(&self, draft: &FilmDraft) -> CatalogResult<Film> {
        let film = logged_write("film_create", None, self.store.create_film(draft))?;
        info!(
            "event=film_create module=catalog status=ok id={} genres={}",
            film.id,
            film.genre_ids.len()
        );
        Ok(film)
    }

    /// Overwrites a film, director and genre set included; `Ok(None)` when
    /// `id` does not exist.
    pub fn update_film(&self, id: FilmId, draft: &FilmDraft) -> CatalogResult<Option<Film>> {
        ensure_positive_id("film_id", id)?;
        absent_on_not_found(logged_write(
            "film_update",
            Some(id),
            self.store.update_film(id, draft),
        ))
    }

    /// Deletes a film with its roles and genre memberships.
    pub fn delete_film(&self, id: FilmId) -> CatalogResult<()> {
        ensure_positive_id("film_id", id)?;
        logged_delete("film_delete", id, self.store.delete_film(id))
    }

    pub fn find_films(&self, lookup: &FilmLookup) -> CatalogResult<Vec<Film>> {
        Ok(self.store.find_films(lookup)?)
    }

    pub fn find_film_by_external_id(&self, external_id: &str) -> CatalogResult<Option<Film>> {
        Ok(self.store.find_film_by_external_id(external_id)?)
    }

    pub fn films_by_genre_types(
        &self,
        genre_types: &BTreeSet<String>,
    ) -> CatalogResult<Vec<Film>> {
        Ok(self.store.films_by_genre_types(genre_types)?)
    }

    pub fn films_released_between(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> CatalogResult<Vec<Film>> {
        Ok(self.store.films_released_between(start_year, end_year)?)
    }

    // Directors

    pub fn list_directors(&self, request: PageRequest) -> CatalogResult<Page<Director>> {
        Ok(self.store.list_directors(request)?)
    }

    pub fn get_director(&self, id: DirectorId) -> CatalogResult<Option<Director>> {
        ensure_positive_id("director_id", id)?;
        Ok(self.store.get_director(id)?)
    }

    pub fn create_director(&self, draft: &DirectorDraft) -> CatalogResult<Director> {
        let director = logged_write("director_create", None, self.store.create_director(draft))?;
        info!(
            "event=director_create module=catalog status=ok id={}",
            director.id
        );
        Ok(director)
    }

    /// Overwrites a director; `Ok(None)` when `id` does not exist.
    pub fn update_director(
        &self,
        id: DirectorId,
        draft: &DirectorDraft,
    ) -> CatalogResult<Option<Director>> {
        ensure_positive_id("director_id", id)?;
        absent_on_not_found(logged_write(
            "director_update",
            Some(id),
            self.store.update_director(id, draft),
        ))
    }

    /// Deletes a director; their films stay with no director.
    pub fn delete_director(&self, id: DirectorId) -> CatalogResult<()> {
        ensure_positive_id("director_id", id)?;
        logged_delete("director_delete", id, self.store.delete_director(id))
    }

    pub fn find_directors(&self, lookup: &DirectorLookup) -> CatalogResult<Vec<Director>> {
        Ok(self.store.find_directors(lookup)?)
    }

    pub fn find_director_by_external_id(
        &self,
        external_id: &str,
    ) -> CatalogResult<Option<Director>> {
        Ok(self.store.find_director_by_external_id(external_id)?)
    }

    // Genres

    pub fn list_genres(&self, request: PageRequest) -> CatalogResult<Page<Genre>> {
        Ok(self.store.list_genres(request)?)
    }

    pub fn list_all_genres(&self) -> CatalogResult<Vec<Genre>> {
        Ok(self.store.list_all_genres()?)
    }

    pub fn get_genre(&self, id: GenreId) -> CatalogResult<Option<Genre>> {
        ensure_positive_id("genre_id", id)?;
        Ok(self.store.get_genre(id)?)
    }

    pub fn create_genre(&self, draft: &GenreDraft) -> CatalogResult<Genre> {
        let genre = logged_write("genre_create", None, self.store.create_genre(draft))?;
        info!("event=genre_create module=catalog status=ok id={}", genre.id);
        Ok(genre)
    }

    /// Renames a genre; `Ok(None)` when `id` does not exist.
    pub fn update_genre(&self, id: GenreId, draft: &GenreDraft) -> CatalogResult<Option<Genre>> {
        ensure_positive_id("genre_id", id)?;
        absent_on_not_found(logged_write(
            "genre_update",
            Some(id),
            self.store.update_genre(id, draft),
        ))
    }

    pub fn delete_genre(&self, id: GenreId) -> CatalogResult<()> {
        ensure_positive_id("genre_id", id)?;
        logged_delete("genre_delete", id, self.store.delete_genre(id))
    }

    pub fn find_genres_by_type(&self, kind: &str) -> CatalogResult<Vec<Genre>> {
        Ok(self.store.find_genres_by_type(kind)?)
    }

    pub fn find_genre_by_type(&self, kind: &str) -> CatalogResult<Option<Genre>> {
        Ok(self.store.find_genre_by_type(kind)?)
    }

    // Roles

    pub fn get_role(&self, id: RoleId) -> CatalogResult<Option<Role>> {
        ensure_positive_id("role_id", id)?;
        Ok(self.store.get_role(id)?)
    }

    pub fn create_role(&self, draft: &RoleDraft) -> CatalogResult<Role> {
        let role = logged_write("role_create", None, self.store.create_role(draft))?;
        info!(
            "event=role_create module=catalog status=ok id={} actor_id={} film_id={}",
            role.id, role.actor_id, role.film_id
        );
        Ok(role)
    }

    /// Overwrites a role; `Ok(None)` when `id` does not exist.
    pub fn update_role(&self, id: RoleId, draft: &RoleDraft) -> CatalogResult<Option<Role>> {
        ensure_positive_id("role_id", id)?;
        absent_on_not_found(logged_write(
            "role_update",
            Some(id),
            self.store.update_role(id, draft),
        ))
    }

    pub fn delete_role(&self, id: RoleId) -> CatalogResult<()> {
        ensure_positive_id("role_id", id)?;
        logged_delete("role_delete", id, self.store.delete_role(id))
    }

    pub fn roles_of_actor(&self, actor_id: ActorId) -> CatalogResult<Vec<Role>> {
        Ok(self.store.roles_of_actor(actor_id)?)
    }

    pub fn roles_of_film(&self, film_id: FilmId) -> CatalogResult<Vec<Role>> {
        Ok(self.store.roles_of_film(film_id)?)
    }

    // Traversals

    pub fn films_of_actor(&self, actor_id: ActorId) -> CatalogResult<Vec<FilmYear>> {
        Ok(self.store.films_of_actor(actor_id)?)
    }

    pub fn actors_in_films(
        &self,
        film_id_1: FilmId,
        film_id_2: FilmId,
    ) -> CatalogResult<Vec<String>> {
        Ok(self.store.actors_in_films(film_id_1, film_id_2)?)
    }

    pub fn films_of_two_actors(
        &self,
        actor_id_1: ActorId,
        actor_id_2: ActorId,
    ) -> CatalogResult<Vec<FilmYear>> {
        Ok(self.store.films_of_two_actors(actor_id_1, actor_id_2)?)
    }

    pub fn cast_of_film(&self, film_id: FilmId) -> CatalogResult<Vec<CastEntry>> {
        Ok(self.store.cast_of_film(film_id)?)
    }

    pub fn films_of_genre(&self, genre_id: GenreId) -> CatalogResult<Vec<FilmYear>> {
        Ok(self.store.films_of_genre(genre_id)?)
    }

    pub fn films_of_director(&self, director_id: DirectorId) -> CatalogResult<Vec<FilmYear>> {
        Ok(self.store.films_of_director(director_id)?)
    }

    pub fn films_of_actor_between_years(
        &self,
        start_year: i32,
        end_year: i32,
        actor_id: ActorId,
    ) -> CatalogResult<Vec<FilmYear>> {
        Ok(self
            .store
            .films_of_actor_between_years(start_year, end_year, actor_id)?)
    }
}

fn logged_write<T>(event: &'static str, id: Option<i64>, result: RepoResult<T>) -> RepoResult<T> {
    if let Err(err) = &result {
        let line = write_failure_line(event, id, err);
        match err {
            RepoError::NotFound { .. } => info!("{line}"),
            _ => warn!("{line}"),
        }
    }
    result
}

/// Metadata-only failure line; statement text and bound values stay out.
fn write_failure_line(event: &str, id: Option<i64>, err: &RepoError) -> String {
    let id = id.map_or_else(|| "none".to_string(), |value| value.to_string());
    let status = match err {
        RepoError::NotFound { .. } => "not_found",
        _ => "error",
    };
    format!(
        "event={event} module=catalog status={status} id={id} error_code={}",
        err.code()
    )
}

fn logged_delete(event: &'static str, id: i64, result: RepoResult<bool>) -> CatalogResult<()> {
    let removed = logged_write(event, Some(id), result)?;
    info!("event={event} module=catalog status=ok id={id} removed={removed}");
    Ok(())
}

fn absent_on_not_found<T>(result: RepoResult<T>) -> CatalogResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(RepoError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
