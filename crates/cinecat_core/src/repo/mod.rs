//! Catalog persistence: write paths and single-row reads.
//!
//! # Responsibility
//! - Define one repository contract per entity.
//! - Implement every contract on `SqliteCatalogStore`, which borrows one
//!   migrated connection.
//! - Classify SQLite constraint failures into `RepoError::ConstraintViolation`.
//!
//! # Invariants
//! - Writes call the draft's `validate()` before any SQL runs.
//! - Multi-statement writes run inside a single immediate transaction and
//!   re-read the written row before committing.
//! - Multi-statement reads run inside a single deferred transaction.
//! - Deletes cascade to roles and genre membership (see `0001_init.sql`).

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::ValidationError;
use crate::query::lookup::LookupQuery;
use crate::query::relation::RelationQuery;
use rusqlite::{Connection, ErrorCode, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod actor_repo;
pub mod director_repo;
pub mod film_repo;
pub mod genre_repo;
pub mod role_repo;

use actor_repo::ActorRepository;
use director_repo::DirectorRepository;
use film_repo::FilmRepository;
use genre_repo::GenreRepository;
use role_repo::RoleRepository;

const REQUIRED_TABLES: [&str; 6] = ["actor", "director", "film", "film_genre", "genre", "role"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Error shared by catalog repositories and queries.
#[derive(Debug)]
pub enum RepoError {
    /// Draft failed structural validation; nothing was written.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap failure.
    Db(DbError),
    /// Target row does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// Uniqueness or referential-integrity breach reported by the store.
    ConstraintViolation(String),
    /// Caller supplied a malformed argument (bad id, inverted range, page).
    InvalidArgument(String),
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing from the connection schema.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::ConstraintViolation(message) => write!(f, "constraint violation: {message}"),
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "catalog store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "catalog store requires table `{table}`")
            }
        }
    }
}

impl RepoError {
    /// Stable metadata-only code for log lines; never carries SQL text.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Db(_) => "db_failure",
            Self::NotFound { .. } => "not_found",
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::InvalidData(_) => "invalid_data",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_required_table",
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => err.into(),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(err, message) = &value {
            if err.code == ErrorCode::ConstraintViolation {
                return Self::ConstraintViolation(
                    message.clone().unwrap_or_else(|| err.to_string()),
                );
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Everything the catalog service needs from a backing store.
pub trait CatalogStore:
    ActorRepository
    + FilmRepository
    + DirectorRepository
    + GenreRepository
    + RoleRepository
    + LookupQuery
    + RelationQuery
{
}

impl<T> CatalogStore for T where
    T: ActorRepository
        + FilmRepository
        + DirectorRepository
        + GenreRepository
        + RoleRepository
        + LookupQuery
        + RelationQuery
{
}

/// SQLite-backed catalog store over one borrowed connection.
pub struct SqliteCatalogStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when a catalog table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &'conn Connection {
        self.conn
    }
}

/// Runs `read` inside one deferred transaction.
pub(crate) fn with_read_tx<T>(
    conn: &Connection,
    read: impl FnOnce(&Connection) -> RepoResult<T>,
) -> RepoResult<T> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Deferred)?;
    let value = read(&tx)?;
    tx.commit()?;
    Ok(value)
}

/// Runs `write` inside one immediate transaction; an `Err` rolls it back.
pub(crate) fn with_write_tx<T>(
    conn: &Connection,
    write: impl FnOnce(&Connection) -> RepoResult<T>,
) -> RepoResult<T> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let value = write(&tx)?;
    tx.commit()?;
    Ok(value)
}

fn ensure_catalog_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
