//! `cinecat` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration from environment and flags.
//! - Run one catalog query and print the result as JSON.

use cinecat_core::config::DB_PATH_ENV;
use cinecat_core::{
    core_version, ping, CatalogConfig, CatalogService, PageRequest, SqliteCatalogStore,
};
use clap::{Parser, Subcommand};
use log::error;
use serde::Serialize;
use std::collections::BTreeSet;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "cinecat", version, about = "Film catalog queries")]
struct Cli {
    /// SQLite catalog file (defaults to $CINECAT_DB); required by data commands.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level (defaults to $CINECAT_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute log directory (defaults to $CINECAT_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Checks core linkage.
    Ping,
    /// Prints the core version.
    Version,
    /// Lists one page of actors.
    Actors {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    /// Lists one page of films.
    Films {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    /// Lists every genre.
    Genres,
    /// Films an actor plays in.
    FilmsOfActor { actor_id: i64 },
    /// Actors with a role in both films.
    ActorsInFilms { film_id_1: i64, film_id_2: i64 },
    /// Films shared by two actors.
    FilmsOfTwoActors { actor_id_1: i64, actor_id_2: i64 },
    /// Actors and characters of a film.
    Cast { film_id: i64 },
    /// Films of a genre id.
    FilmsOfGenre { genre_id: i64 },
    /// Films of a director id.
    FilmsOfDirector { director_id: i64 },
    /// Films belonging to any of the given genre types.
    FilmsByGenres {
        #[arg(required = true)]
        genre_types: Vec<String>,
    },
    /// Films released between two years, optionally restricted to an actor.
    FilmsBetween {
        start_year: i32,
        end_year: i32,
        #[arg(long)]
        actor_id: Option<i64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error");
            eprintln!("cinecat: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&cli);
    config.validate()?;
    config.init_logging()?;

    match cli.command {
        Command::Ping => {
            println!("{}", ping());
            return Ok(());
        }
        Command::Version => {
            println!("{}", core_version());
            return Ok(());
        }
        _ => {}
    }

    require_catalog_path(&config)?;
    let conn = config.open_connection()?;
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn)?);

    match cli.command {
        Command::Ping | Command::Version => Ok(()),
        Command::Actors { page, size } => {
            print_json(&service.list_actors(PageRequest::new(page, size))?)
        }
        Command::Films { page, size } => {
            print_json(&service.list_films(PageRequest::new(page, size))?)
        }
        Command::Genres => print_json(&service.list_all_genres()?),
        Command::FilmsOfActor { actor_id } => print_json(&service.films_of_actor(actor_id)?),
        Command::ActorsInFilms {
            film_id_1,
            film_id_2,
        } => print_json(&service.actors_in_films(film_id_1, film_id_2)?),
        Command::FilmsOfTwoActors {
            actor_id_1,
            actor_id_2,
        } => print_json(&service.films_of_two_actors(actor_id_1, actor_id_2)?),
        Command::Cast { film_id } => print_json(&service.cast_of_film(film_id)?),
        Command::FilmsOfGenre { genre_id } => print_json(&service.films_of_genre(genre_id)?),
        Command::FilmsOfDirector { director_id } => {
            print_json(&service.films_of_director(director_id)?)
        }
        Command::FilmsByGenres { genre_types } => {
            let genre_types: BTreeSet<String> = genre_types.into_iter().collect();
            print_json(&service.films_by_genre_types(&genre_types)?)
        }
        Command::FilmsBetween {
            start_year,
            end_year,
            actor_id: Some(actor_id),
        } => print_json(&service.films_of_actor_between_years(
            start_year, end_year, actor_id,
        )?),
        Command::FilmsBetween {
            start_year,
            end_year,
            actor_id: None,
        } => print_json(&service.films_released_between(start_year, end_year)?),
    }
}

fn resolve_config(cli: &Cli) -> CatalogConfig {
    let mut config = CatalogConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path = Some(db.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    config
}

fn require_catalog_path(config: &CatalogConfig) -> Result<(), Box<dyn Error>> {
    match &config.db_path {
        Some(_) => Ok(()),
        None => Err(format!(
            "no catalog database configured; pass --db or set {DB_PATH_ENV}"
        )
        .into()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
