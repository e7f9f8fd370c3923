//! User directory contracts and SQLite implementation.
//!
//! # Invariants
//! - User ids are generated on insert and never updated.
//! - Emails are unique; a duplicate registration reports `Conflict`.

use super::{ensure_connection_ready, is_constraint_violation, parse_uuid, RepoError, RepoResult};
use crate::model::user::{RegistrationFields, User, UserId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const USER_SELECT_SQL: &str = "SELECT uuid, name, email, created_at FROM users";

/// Repository interface for the user directory.
pub trait UserRepository {
    fn create_user(&self, fields: &RegistrationFields) -> RepoResult<User>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed user directory.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, fields: &RegistrationFields) -> RepoResult<User> {
        let id = Uuid::new_v4();
        let inserted = self.conn.execute(
            "INSERT INTO users (uuid, name, email) VALUES (?1, ?2, ?3);",
            params![id.to_string(), fields.name(), fields.email()],
        );

        match inserted {
            Ok(_) => {}
            Err(err) if is_constraint_violation(&err) => {
                return Err(RepoError::Conflict(
                    "email address is already registered".to_string(),
                ));
            }
            Err(err) => return Err(err.into()),
        }

        self.get_user(id)?
            .ok_or(RepoError::NotFound { entity: "user", id })
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        query_one_user(self.conn, "uuid", &id.to_string())
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        query_one_user(self.conn, "email", &email.trim().to_lowercase())
    }
}

fn query_one_user(conn: &Connection, column: &str, value: &str) -> RepoResult<Option<User>> {
    let user = conn
        .query_row(
            &format!("{USER_SELECT_SQL} WHERE {column} = ?1;"),
            [value],
            |row| Ok(parse_user_row(row)),
        )
        .optional()?;

    user.transpose()
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id_text: String = row.get("uuid")?;
    Ok(User {
        id: parse_uuid(&id_text, "users.uuid")?,
        name: row.get("name")?,
        email: row.get("email")?,
        created_at: row.get("created_at")?,
    })
}
