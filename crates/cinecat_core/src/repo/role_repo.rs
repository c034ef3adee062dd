//! Role (actor/film junction) persistence on the catalog store.
//!
//! # Invariants
//! - A role always references an existing actor and film; dangling ids are
//!   rejected by the store as `RepoError::ConstraintViolation`.
//! - Several roles may link the same actor and film (one per character).

use crate::model::role::{Role, RoleDraft, RoleId};
use crate::repo::{RepoError, RepoResult, SqliteCatalogStore};
use rusqlite::{params, OptionalExtension, Row};

pub(crate) const ROLE_SELECT_SQL: &str = "SELECT
    id,
    character_name,
    actor_id,
    film_id
FROM role";

/// Write and single-row read contract for roles.
pub trait RoleRepository {
    fn create_role(&self, draft: &RoleDraft) -> RepoResult<Role>;
    fn get_role(&self, id: RoleId) -> RepoResult<Option<Role>>;
    /// Re-points and renames a role; `RepoError::NotFound` when missing.
    fn update_role(&self, id: RoleId, draft: &RoleDraft) -> RepoResult<Role>;
    fn delete_role(&self, id: RoleId) -> RepoResult<bool>;
}

impl RoleRepository for SqliteCatalogStore<'_> {
    fn create_role(&self, draft: &RoleDraft) -> RepoResult<Role> {
        draft.validate()?;
        self.conn().execute(
            "INSERT INTO role (character_name, actor_id, film_id) VALUES (?1, ?2, ?3);",
            params![draft.character.as_deref(), draft.actor_id, draft.film_id],
        )?;
        Ok(Role {
            id: self.conn().last_insert_rowid(),
            character: draft.character.clone(),
            actor_id: draft.actor_id,
            film_id: draft.film_id,
        })
    }

    fn get_role(&self, id: RoleId) -> RepoResult<Option<Role>> {
        let role = self
            .conn()
            .query_row(
                &format!("{ROLE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_role_row,
            )
            .optional()?;
        Ok(role)
    }

    fn update_role(&self, id: RoleId, draft: &RoleDraft) -> RepoResult<Role> {
        draft.validate()?;
        let changed = self.conn().execute(
            "UPDATE role
             SET
                character_name = ?1,
                actor_id = ?2,
                film_id = ?3
             WHERE id = ?4;",
            params![
                draft.character.as_deref(),
                draft.actor_id,
                draft.film_id,
                id
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "role", id });
        }
        Ok(Role {
            id,
            character: draft.character.clone(),
            actor_id: draft.actor_id,
            film_id: draft.film_id,
        })
    }

    fn delete_role(&self, id: RoleId) -> RepoResult<bool> {
        let changed = self
            .conn()
            .execute("DELETE FROM role WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

pub(crate) fn parse_role_row(row: &Row<'_>) -> rusqlite::Result<Role> {
    Ok(Role {
        id: row.get("id")?,
        character: row.get("character_name")?,
        actor_id: row.get("actor_id")?,
        film_id: row.get("film_id")?,
    })
}
