//! Configuration Management
//!
//! This module loads the database connection parameters.
//!
//! # Configuration Source
//! An environment file (default `database.env`, `KEY=value` lines) is loaded
//! into the process environment, then the six connection keys are read:
//! `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`, `SSL_MODE`.
//!
//! # Resolution
//! - Variables already set in the environment win over the file
//! - A missing file is fatal
//! - A missing key resolves to an empty value; nothing is defaulted here, so
//!   an incomplete file surfaces as a connection failure instead

use std::fmt;
use std::path::Path;

use crate::error::{GymError, Result};

/// Default environment file, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = "database.env";

pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_NAME: &str = "DB_NAME";
pub const SSL_MODE: &str = "SSL_MODE";

/// Load `KEY=value` pairs from `path` into the process environment
pub fn load_env_file(path: &Path) -> Result<()> {
    dotenvy::from_path(path).map_err(|e| {
        GymError::config_error(format!("Error loading env file '{}': {e}", path.display()))
    })?;

    tracing::debug!(path = %path.display(), "loaded environment file");
    Ok(())
}

/// Database connection parameters, as read from the environment
///
/// All fields are kept verbatim as strings; the store backend decides how to
/// interpret them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: String,
    pub user: String,
    /// WARNING: Sensitive data, do not log or include in error messages
    pub password: String,
    pub dbname: String,
    pub ssl_mode: String,
}

impl DbConfig {
    /// Read the connection keys from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the connection keys through `lookup`; absent keys become empty strings
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).unwrap_or_default();
        Self {
            host: get(DB_HOST),
            port: get(DB_PORT),
            user: get(DB_USER),
            password: get(DB_PASSWORD),
            dbname: get(DB_NAME),
            ssl_mode: get(SSL_MODE),
        }
    }

    /// Parsed port number
    pub fn port_number(&self) -> Result<u16> {
        self.port.trim().parse().map_err(|_| {
            GymError::config_error(format!("{DB_PORT} must be a port number, got '{}'", self.port))
        })
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}
