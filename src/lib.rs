//! gymdb - Gym Member Records CLI
//!
//! gymdb manages a single `users` table of gym members: it creates the schema,
//! inserts members, edits one field of a member, and deletes members by id.
//!
//! # Core Principles
//! - Whitelists first: enum values and column names are checked before any
//!   statement is built
//! - Closed column set: each editable column maps to a fixed statement template
//! - Explicit handles: the repository is passed into every operation
//! - Fail fast: every error ends the run
//!
//! # Module Organization
//! - [`error`] - Error types and handling
//! - [`member`] - Member record, enum whitelists, column whitelist
//! - [`config`] - Environment file and connection settings
//! - [`engine`] - Repository trait and store backends
//! - [`cli`] - Interactive prompt session
//! - [`logging`] - Tracing setup

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod member;

// Re-export commonly used types for convenience
pub use cli::{Operation, Session};
pub use config::{load_env_file, DbConfig};
pub use engine::{update_field, DatabaseType, MemberRepository};
pub use error::{GymError, Result};
pub use member::{Column, FieldUpdate, Gender, NewMember, Plan, SkillLevel};
