//! Member Repository Trait and Store Backends
//!
//! This module defines the repository abstraction over the `users` table.
//! Each store (`PostgreSQL`, `SQLite`) implements [`MemberRepository`].
//!
//! # Explicit Handles
//! A repository value owns its connection and is passed into every operation.
//! There is no process-wide connection.
//!
//! # Engine Isolation
//! Each backend is completely independent: its own SQL text, its own
//! parameter binding, no shared SQL helpers. Update statements are fixed
//! per-column templates selected by matching on [`FieldUpdate`].

use std::future::Future;

use uuid::Uuid;

use crate::error::Result;
use crate::member::{Column, FieldUpdate, NewMember};

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Supported store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// `PostgreSQL` database
    Postgres,
    /// `SQLite` database file
    SQLite,
}

impl DatabaseType {
    /// Get the engine name as a string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::SQLite => "sqlite",
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Repository over the `users` table
///
/// Every method is a single statement (the schema initializer is two) and
/// any failure is returned to the caller, which treats it as fatal.
pub trait MemberRepository {
    /// Engine backing this repository
    fn engine(&self) -> DatabaseType;

    /// Idempotently create the UUID extension (where needed) and the `users` table
    fn ensure_schema(&self) -> impl Future<Output = Result<()>>;

    /// Insert a member and return the id assigned by the store
    fn insert(&self, member: &NewMember) -> impl Future<Output = Result<Uuid>>;

    /// Delete the member with `id`, returning the number of rows removed
    ///
    /// Zero rows is not an error.
    fn delete_by_id(&self, id: Uuid) -> impl Future<Output = Result<u64>>;

    /// Set a single column on the member with `id`, returning rows changed
    fn update(&self, id: Uuid, update: &FieldUpdate) -> impl Future<Output = Result<u64>>;
}

/// Update one field from raw user input
///
/// `column_name` is checked against the column whitelist before anything
/// else; `new_value` is then parsed for that column (enum whitelist or
/// number). Only a fully validated [`FieldUpdate`] reaches the store.
pub async fn update_field<R: MemberRepository>(
    repo: &R,
    id: Uuid,
    column_name: &str,
    new_value: &str,
) -> Result<u64> {
    let column: Column = column_name.parse()?;
    let update = column.parse_value(new_value)?;
    let changed = repo.update(id, &update).await?;

    tracing::debug!(engine = %repo.engine(), %id, column = %column, changed, "updated member field");
    Ok(changed)
}
