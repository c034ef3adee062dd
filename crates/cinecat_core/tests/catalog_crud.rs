use chrono::NaiveDate;
use cinecat_core::db::{open_db, open_db_in_memory};
use cinecat_core::{
    ActorDraft, ActorLookup, CatalogError, CatalogService, DirectorDraft, DirectorLookup,
    FilmDraft, FilmLookup, GenreDraft, PageRequest, RoleDraft, SqliteCatalogStore,
};
use std::collections::BTreeSet;

fn actor_draft(name: &str, external_id: &str) -> ActorDraft {
    ActorDraft {
        external_id: Some(external_id.to_string()),
        birth_date: NaiveDate::from_ymd_opt(1963, 3, 27),
        birth_place: Some("Knoxville, Tennessee".to_string()),
        ..ActorDraft::new(name)
    }
}

fn director_draft(name: &str, external_id: &str) -> DirectorDraft {
    DirectorDraft {
        external_id: external_id.to_string(),
        name: name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1963, 3, 27).unwrap(),
        birth_place: "Knoxville, Tennessee".to_string(),
        profile_url: format!("https://catalog.example/director/{external_id}"),
    }
}

#[test]
fn actor_create_get_update_delete_flow() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());

    let created = service
        .create_actor(&actor_draft("Uma Thurman", "nm0000235"))
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(service.get_actor(created.id).unwrap(), Some(created.clone()));

    let mut draft = created.draft();
    draft.birth_place = Some("Boston, Massachusetts".to_string());
    let updated = service.update_actor(created.id, &draft).unwrap().unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.birth_place.as_deref(), Some("Boston, Massachusetts"));

    service.delete_actor(created.id).unwrap();
    assert!(service.get_actor(created.id).unwrap().is_none());
    service.delete_actor(created.id).unwrap();
}

#[test]
fn update_of_missing_id_returns_none_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());
    let genre = service.create_genre(&GenreDraft::new("Drama")).unwrap();

    let updated = service
        .update_genre(genre.id + 100, &GenreDraft::new("Comedy"))
        .unwrap();

    assert!(updated.is_none());
    assert_eq!(service.list_all_genres().unwrap(), vec![genre]);
}

#[test]
fn get_with_non_positive_id_is_invalid_argument() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());

    assert!(matches!(
        service.get_film(0),
        Err(CatalogError::InvalidArgument(_))
    ));
    assert!(matches!(
        service.delete_actor(-3),
        Err(CatalogError::InvalidArgument(_))
    ));
}

#[test]
fn blank_actor_name_is_rejected_before_write() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());

    let err = service.create_actor(&ActorDraft::new("   ")).unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
    assert_eq!(
        service.list_actors(PageRequest::new(0, 10)).unwrap().total_count,
        0
    );
}

#[test]
fn duplicate_external_id_is_constraint_violation() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());
    service
        .create_director(&director_draft("Quentin Tarantino", "nm0000233"))
        .unwrap();

    let err = service
        .create_director(&director_draft("Someone Else", "nm0000233"))
        .unwrap_err();
    assert!(matches!(err, CatalogError::ConstraintViolation(_)));
}

#[test]
fn role_with_unknown_actor_is_constraint_violation() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());
    let film = service
        .create_film(&FilmDraft::new("tt0110912", "Pulp Fiction", 1994))
        .unwrap();

    let err = service
        .create_role(&RoleDraft::new(999, film.id, Some("Vincent".to_string())))
        .unwrap_err();
    assert!(matches!(err, CatalogError::ConstraintViolation(_)));
    assert!(service.roles_of_film(film.id).unwrap().is_empty());
}

#[test]
fn film_with_unknown_genre_is_rolled_back() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());

    let draft = FilmDraft {
        genre_ids: BTreeSet::from([42]),
        ..FilmDraft::new("tt0110912", "Pulp Fiction", 1994)
    };
    let err = service.create_film(&draft).unwrap_err();

    assert!(matches!(err, CatalogError::ConstraintViolation(_)));
    assert!(service
        .find_film_by_external_id("tt0110912")
        .unwrap()
        .is_none());
}

#[test]
fn film_update_replaces_director_and_genre_set() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());
    let crime = service.create_genre(&GenreDraft::new("Crime")).unwrap();
    let drama = service.create_genre(&GenreDraft::new("Drama")).unwrap();
    let thriller = service.create_genre(&GenreDraft::new("Thriller")).unwrap();
    let director = service
        .create_director(&director_draft("Quentin Tarantino", "nm0000233"))
        .unwrap();

    let film = service
        .create_film(&FilmDraft {
            genre_ids: BTreeSet::from([crime.id, drama.id]),
            ..FilmDraft::new("tt0110912", "Pulp Fiction", 1994)
        })
        .unwrap();
    assert_eq!(film.director_id, None);
    assert_eq!(film.genre_ids, BTreeSet::from([crime.id, drama.id]));

    let mut draft = film.draft();
    draft.director_id = Some(director.id);
    draft.genre_ids = BTreeSet::from([thriller.id]);
    let updated = service.update_film(film.id, &draft).unwrap().unwrap();

    assert_eq!(updated.director_id, Some(director.id));
    assert_eq!(updated.genre_ids, BTreeSet::from([thriller.id]));
    assert_eq!(service.get_film(film.id).unwrap(), Some(updated));
}

#[test]
fn deleting_actor_or_film_removes_their_roles() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());
    let uma = service
        .create_actor(&actor_draft("Uma Thurman", "nm0000235"))
        .unwrap();
    let john = service
        .create_actor(&actor_draft("John Travolta", "nm0000237"))
        .unwrap();
    let film = service
        .create_film(&FilmDraft::new("tt0110912", "Pulp Fiction", 1994))
        .unwrap();
    let other = service
        .create_film(&FilmDraft::new("tt0119396", "Jackie Brown", 1997))
        .unwrap();
    service
        .create_role(&RoleDraft::new(uma.id, film.id, Some("Mia".to_string())))
        .unwrap();
    service
        .create_role(&RoleDraft::new(john.id, film.id, None))
        .unwrap();
    service
        .create_role(&RoleDraft::new(john.id, other.id, None))
        .unwrap();

    service.delete_actor(uma.id).unwrap();
    let remaining = service.roles_of_film(film.id).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].actor_id, john.id);

    service.delete_film(film.id).unwrap();
    let johns_roles = service.roles_of_actor(john.id).unwrap();
    assert_eq!(johns_roles.len(), 1);
    assert_eq!(johns_roles[0].film_id, other.id);
}

#[test]
fn deleting_director_keeps_films_without_director() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());
    let director = service
        .create_director(&director_draft("Quentin Tarantino", "nm0000233"))
        .unwrap();
    let film = service
        .create_film(&FilmDraft {
            director_id: Some(director.id),
            ..FilmDraft::new("tt0110912", "Pulp Fiction", 1994)
        })
        .unwrap();

    service.delete_director(director.id).unwrap();

    let film = service.get_film(film.id).unwrap().unwrap();
    assert_eq!(film.director_id, None);
    assert!(service.films_of_director(director.id).unwrap().is_empty());
}

#[test]
fn deleting_genre_drops_membership_only() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());
    let crime = service.create_genre(&GenreDraft::new("Crime")).unwrap();
    let film = service
        .create_film(&FilmDraft {
            genre_ids: BTreeSet::from([crime.id]),
            ..FilmDraft::new("tt0110912", "Pulp Fiction", 1994)
        })
        .unwrap();

    service.delete_genre(crime.id).unwrap();

    let film = service.get_film(film.id).unwrap().unwrap();
    assert!(film.genre_ids.is_empty());
}

#[test]
fn role_update_moves_role_between_films() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());
    let actor = service
        .create_actor(&actor_draft("Samuel L. Jackson", "nm0000168"))
        .unwrap();
    let first = service
        .create_film(&FilmDraft::new("tt0110912", "Pulp Fiction", 1994))
        .unwrap();
    let second = service
        .create_film(&FilmDraft::new("tt0119396", "Jackie Brown", 1997))
        .unwrap();
    let role = service
        .create_role(&RoleDraft::new(actor.id, first.id, Some("Jules".to_string())))
        .unwrap();

    let updated = service
        .update_role(
            role.id,
            &RoleDraft::new(actor.id, second.id, Some("Ordell".to_string())),
        )
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, role.id);
    assert!(service.roles_of_film(first.id).unwrap().is_empty());
    assert_eq!(service.roles_of_film(second.id).unwrap(), vec![updated]);
}

#[test]
fn scalar_lookups_match_exact_values() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());
    let uma = service
        .create_actor(&actor_draft("Uma Thurman", "nm0000235"))
        .unwrap();
    let director = service
        .create_director(&director_draft("Quentin Tarantino", "nm0000233"))
        .unwrap();
    let film = service
        .create_film(&FilmDraft {
            shoot_location: "Los Angeles".to_string(),
            ..FilmDraft::new("tt0110912", "Pulp Fiction", 1994)
        })
        .unwrap();
    service
        .create_film(&FilmDraft::new("tt0119396", "Jackie Brown", 1997))
        .unwrap();
    service.create_genre(&GenreDraft::new("Crime")).unwrap();
    let second_crime = service.create_genre(&GenreDraft::new("Crime")).unwrap();

    assert_eq!(
        service
            .find_actors(&ActorLookup::Name("Uma Thurman".to_string()))
            .unwrap(),
        vec![uma.clone()]
    );
    assert!(service
        .find_actors(&ActorLookup::Name("uma thurman".to_string()))
        .unwrap()
        .is_empty());
    assert_eq!(
        service.find_actor_by_external_id("nm0000235").unwrap(),
        Some(uma)
    );
    assert_eq!(
        service
            .find_directors(&DirectorLookup::BirthDate(director.birth_date))
            .unwrap(),
        vec![director.clone()]
    );
    assert_eq!(
        service.find_director_by_external_id("nm0000233").unwrap(),
        Some(director)
    );
    assert_eq!(
        service.find_films(&FilmLookup::ReleaseYear(1994)).unwrap(),
        vec![film.clone()]
    );
    assert_eq!(
        service
            .find_films(&FilmLookup::ShootLocation("Los Angeles".to_string()))
            .unwrap(),
        vec![film]
    );

    let crimes = service.find_genres_by_type("Crime").unwrap();
    assert_eq!(crimes.len(), 2);
    assert_eq!(crimes[1], second_crime);
    assert_eq!(service.find_genre_by_type("Crime").unwrap(), Some(crimes[0].clone()));
    assert!(service.find_genre_by_type("Western").unwrap().is_none());
}

#[test]
fn director_and_film_updates_on_missing_id_write_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());
    let director = service
        .create_director(&director_draft("Quentin Tarantino", "nm0000233"))
        .unwrap();
    let drama = service.create_genre(&GenreDraft::new("Drama")).unwrap();
    let film = service
        .create_film(&FilmDraft::new("tt0110912", "Pulp Fiction", 1994))
        .unwrap();

    let updated_director = service
        .update_director(
            director.id + 100,
            &director_draft("Somebody Else", "nm9999999"),
        )
        .unwrap();
    let updated_film = service
        .update_film(
            film.id + 100,
            &FilmDraft {
                director_id: Some(director.id),
                genre_ids: BTreeSet::from([drama.id]),
                ..FilmDraft::new("tt9999999", "Missing", 2001)
            },
        )
        .unwrap();

    assert!(updated_director.is_none());
    assert!(updated_film.is_none());
    let directors = service.list_directors(PageRequest::new(0, 10)).unwrap();
    assert_eq!(directors.items, vec![director]);
    let films = service.list_films(PageRequest::new(0, 10)).unwrap();
    assert_eq!(films.items, vec![film]);
    assert!(service.films_of_genre(drama.id).unwrap().is_empty());
}

#[test]
fn repeated_delete_succeeds_for_every_entity() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteCatalogStore::try_new(&conn).unwrap());
    let director = service
        .create_director(&director_draft("Quentin Tarantino", "nm0000233"))
        .unwrap();
    let genre = service.create_genre(&GenreDraft::new("Crime")).unwrap();
    let actor = service
        .create_actor(&actor_draft("Uma Thurman", "nm0000235"))
        .unwrap();
    let film = service
        .create_film(&FilmDraft::new("tt0110912", "Pulp Fiction", 1994))
        .unwrap();
    let role = service
        .create_role(&RoleDraft::new(actor.id, film.id, Some("Mia".to_string())))
        .unwrap();

    for _ in 0..2 {
        service.delete_role(role.id).unwrap();
        service.delete_film(film.id).unwrap();
        service.delete_director(director.id).unwrap();
        service.delete_genre(genre.id).unwrap();
    }

    assert!(service.get_role(role.id).unwrap().is_none());
    assert!(service.get_film(film.id).unwrap().is_none());
    assert!(service.get_director(director.id).unwrap().is_none());
    assert!(service.get_genre(genre.id).unwrap().is_none());
    assert_eq!(service.get_actor(actor.id).unwrap(), Some(actor));
}

#[test]
fn film_reads_and_writes_share_a_file_store_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    let writer_conn = open_db(&path).unwrap();
    let reader_conn = open_db(&path).unwrap();
    let writer = CatalogService::new(SqliteCatalogStore::try_new(&writer_conn).unwrap());
    let reader = CatalogService::new(SqliteCatalogStore::try_new(&reader_conn).unwrap());
    let crime = writer.create_genre(&GenreDraft::new("Crime")).unwrap();

    let created = writer
        .create_film(&FilmDraft {
            genre_ids: BTreeSet::from([crime.id]),
            ..FilmDraft::new("tt0110912", "Pulp Fiction", 1994)
        })
        .unwrap();

    assert_eq!(created.genre_ids, BTreeSet::from([crime.id]));
    assert_eq!(reader.get_film(created.id).unwrap(), Some(created.clone()));
    let page = reader.list_films(PageRequest::new(0, 10)).unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items, vec![created]);
    assert!(reader_conn.is_autocommit());
    assert!(writer_conn.is_autocommit());
}
