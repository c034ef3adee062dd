//! Core catalog logic: entity model, storage, queries and service facade.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use config::CatalogConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::actor::{Actor, ActorDraft, ActorId};
pub use model::director::{Director, DirectorDraft, DirectorId};
pub use model::film::{Film, FilmDraft, FilmId};
pub use model::genre::{Genre, GenreDraft, GenreId};
pub use model::role::{Role, RoleDraft, RoleId};
pub use model::ValidationError;
pub use query::lookup::{ActorLookup, DirectorLookup, FilmLookup, LookupQuery};
pub use query::page::{Page, PageRequest, MAX_PAGE_SIZE};
pub use query::relation::{CastEntry, FilmYear, RelationQuery};
pub use repo::actor_repo::ActorRepository;
pub use repo::director_repo::DirectorRepository;
pub use repo::film_repo::FilmRepository;
pub use repo::genre_repo::GenreRepository;
pub use repo::role_repo::RoleRepository;
pub use repo::{CatalogStore, RepoError, RepoResult, SqliteCatalogStore};
pub use service::catalog_service::{CatalogError, CatalogResult, CatalogService};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
