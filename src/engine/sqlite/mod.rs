//! `SQLite` Store Implementation
//!
//! This module implements [`MemberRepository`] for a local `SQLite` file.
//!
//! # Features
//! - File-based stores (`/path/to/gym.db`)
//! - In-memory stores (`:memory:`)
//! - Same `users` table shape and CHECK constraints as `PostgreSQL`
//!
//! # Implementation Notes
//! - Uses `rusqlite` (synchronous driver, no async needed)
//! - Ids are stored as canonical lowercase UUID text; the column default
//!   generates a random version-4 UUID so the store still assigns ids
//! - Weights are rounded to two fractional digits on write and bounded to
//!   what `DECIMAL(5,2)` holds, since `SQLite` does not enforce precision
//! - `RETURNING` requires `SQLite` 3.35+ (the bundled library is newer)

use std::path::Path;

use rusqlite::{params, Connection, OpenFlags};
use uuid::Uuid;

use crate::engine::{DatabaseType, MemberRepository};
use crate::error::{GymError, Result};
use crate::member::{FieldUpdate, NewMember};

const CREATE_USERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id TEXT NOT NULL PRIMARY KEY DEFAULT (
            lower(hex(randomblob(4))) || '-' ||
            lower(hex(randomblob(2))) || '-4' ||
            substr(lower(hex(randomblob(2))), 2) || '-' ||
            substr('89ab', 1 + (abs(random()) % 4), 1) ||
            substr(lower(hex(randomblob(2))), 2) || '-' ||
            lower(hex(randomblob(6)))
        ),
        name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        age INTEGER NOT NULL,
        height INTEGER NOT NULL,
        weight DECIMAL(5,2) NOT NULL CHECK (weight > -1000 AND weight < 1000),
        gender TEXT NOT NULL CHECK (gender IN ('Male','Female')),
        plan TEXT NOT NULL CHECK (plan IN ('normal','semi-interactive','fully-interactive')),
        skill_level TEXT NOT NULL CHECK (skill_level IN ('Beginner','Intermediate','Master')),
        created TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )";

const INSERT_MEMBER: &str = "
    INSERT INTO users (name, last_name, age, height, weight, gender, skill_level, plan)
    VALUES (?1, ?2, ?3, ?4, ROUND(?5, 2), ?6, ?7, ?8)
    RETURNING id";

const DELETE_MEMBER: &str = "DELETE FROM users WHERE id = ?1";

/// `SQLite`-backed member repository
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
        let conn = Connection::open_with_flags(path, flags).map_err(|e| {
            GymError::connection_failed(format!("Failed to open SQLite database: {e}"))
        })?;

        tracing::debug!(path = %path.display(), "opened SQLite store");
        Ok(Self { conn })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            GymError::connection_failed(format!("Failed to open in-memory SQLite database: {e}"))
        })?;
        Ok(Self { conn })
    }

    /// Underlying connection
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl MemberRepository for SqliteStore {
    fn engine(&self) -> DatabaseType {
        DatabaseType::SQLite
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(CREATE_USERS_TABLE)
            .map_err(|e| GymError::query_failed(format!("Failed to create users table: {e}")))
    }

    async fn insert(&self, member: &NewMember) -> Result<Uuid> {
        let id: String = self
            .conn
            .query_row(
                INSERT_MEMBER,
                params![
                    member.name,
                    member.last_name,
                    member.age,
                    member.height,
                    member.weight,
                    member.gender.as_str(),
                    member.skill_level.as_str(),
                    member.plan.as_str(),
                ],
                |row| row.get(0),
            )
            .map_err(|e| GymError::query_failed(format!("Failed to insert member: {e}")))?;

        Uuid::parse_str(&id).map_err(|e| {
            GymError::engine_error("sqlite", format!("Insert returned an unreadable id '{id}': {e}"))
        })
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64> {
        let removed = self
            .conn
            .execute(DELETE_MEMBER, params![id.to_string()])
            .map_err(|e| GymError::query_failed(format!("Failed to delete member {id}: {e}")))?;
        Ok(removed as u64)
    }

    async fn update(&self, id: Uuid, update: &FieldUpdate) -> Result<u64> {
        let key = id.to_string();
        let result = match update {
            FieldUpdate::Name(v) => {
                self.conn.execute("UPDATE users SET name = ?1 WHERE id = ?2", params![v, key])
            }
            FieldUpdate::LastName(v) => {
                self.conn.execute("UPDATE users SET last_name = ?1 WHERE id = ?2", params![v, key])
            }
            FieldUpdate::Age(v) => {
                self.conn.execute("UPDATE users SET age = ?1 WHERE id = ?2", params![v, key])
            }
            FieldUpdate::Height(v) => {
                self.conn.execute("UPDATE users SET height = ?1 WHERE id = ?2", params![v, key])
            }
            FieldUpdate::Weight(v) => self
                .conn
                .execute("UPDATE users SET weight = ROUND(?1, 2) WHERE id = ?2", params![v, key]),
            FieldUpdate::Gender(v) => self
                .conn
                .execute("UPDATE users SET gender = ?1 WHERE id = ?2", params![v.as_str(), key]),
            FieldUpdate::Plan(v) => self
                .conn
                .execute("UPDATE users SET plan = ?1 WHERE id = ?2", params![v.as_str(), key]),
            FieldUpdate::SkillLevel(v) => self.conn.execute(
                "UPDATE users SET skill_level = ?1 WHERE id = ?2",
                params![v.as_str(), key],
            ),
        };

        let changed = result.map_err(|e| {
            GymError::query_failed(format!("Failed to update {} for member {id}: {e}", update.column()))
        })?;
        Ok(changed as u64)
    }
}
