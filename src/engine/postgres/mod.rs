//! `PostgreSQL` Store Implementation
//!
//! This module implements [`MemberRepository`] for `PostgreSQL`, the production
//! store.
//!
//! # Implementation Notes
//! - Uses `tokio-postgres` (async driver, requires tokio runtime)
//! - One connection per process; the connection task is spawned once and the
//!   `Client` lives inside [`PostgresStore`]
//! - `gen_random_uuid()` comes from the `pgcrypto` extension
//! - Weights are bound as `float8` and cast by the column to `DECIMAL(5,2)`
//! - TLS goes through `native-tls`; `SSL_MODE` follows libpq naming
//!   (`disable`, `prefer`, `require`, `verify-ca`, `verify-full`)

use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::config::SslMode;
use tokio_postgres::{Client, Config};
use uuid::Uuid;

use crate::config::{DbConfig, SSL_MODE};
use crate::engine::{DatabaseType, MemberRepository};
use crate::error::{GymError, Result};
use crate::member::{FieldUpdate, NewMember};

const CREATE_EXTENSION: &str = "CREATE EXTENSION IF NOT EXISTS pgcrypto";

const CREATE_USERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
        name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        age INT NOT NULL,
        height INT NOT NULL,
        weight DECIMAL(5,2) NOT NULL,
        gender TEXT NOT NULL CHECK (gender IN ('Male','Female')),
        plan TEXT NOT NULL CHECK (plan IN ('normal','semi-interactive','fully-interactive')),
        skill_level TEXT NOT NULL CHECK (skill_level IN ('Beginner','Intermediate','Master')),
        created TIMESTAMP NOT NULL DEFAULT now()
    )";

const INSERT_MEMBER: &str = "
    INSERT INTO users (name, last_name, age, height, weight, gender, skill_level, plan)
    VALUES ($1, $2, $3, $4, $5::float8, $6, $7, $8)
    RETURNING id";

const DELETE_MEMBER: &str = "DELETE FROM users WHERE id = $1";

/// `PostgreSQL`-backed member repository
pub struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    /// Connect and ping the server
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let tls_mode = parse_ssl_mode(&config.ssl_mode)?;
        let pg_config = build_pg_config(config)?;

        // Never consulted under `disable`
        let tls = tls_mode.connector()?;

        let (client, connection) = pg_config.connect(tls).await.map_err(|e| {
            GymError::connection_failed(format!("Failed to connect to PostgreSQL: {e}"))
        })?;

        // Note: Connection errors are not logged to prevent credential leakage
        tokio::spawn(async move {
            let _ = connection.await;
        });

        client.query_one("SELECT 1", &[]).await.map_err(|e| {
            GymError::connection_failed(format!("Failed to ping PostgreSQL: {e}"))
        })?;

        tracing::debug!(
            host = %config.host,
            dbname = %config.dbname,
            ssl_mode = ?tls_mode,
            "connected to PostgreSQL"
        );
        Ok(Self { client })
    }
}

impl MemberRepository for PostgresStore {
    fn engine(&self) -> DatabaseType {
        DatabaseType::Postgres
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.batch_execute(CREATE_EXTENSION).await.map_err(|e| {
            GymError::query_failed(format!("Failed to create pgcrypto extension: {e}"))
        })?;

        self.client.batch_execute(CREATE_USERS_TABLE).await.map_err(|e| {
            GymError::query_failed(format!("Failed to create users table: {e}"))
        })?;

        Ok(())
    }

    async fn insert(&self, member: &NewMember) -> Result<Uuid> {
        let row = self
            .client
            .query_one(
                INSERT_MEMBER,
                &[
                    &member.name,
                    &member.last_name,
                    &member.age,
                    &member.height,
                    &member.weight,
                    &member.gender.as_str(),
                    &member.skill_level.as_str(),
                    &member.plan.as_str(),
                ],
            )
            .await
            .map_err(|e| GymError::query_failed(format!("Failed to insert member: {e}")))?;

        row.try_get(0).map_err(|e| {
            GymError::engine_error("postgres", format!("Insert returned an unreadable id: {e}"))
        })
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64> {
        self.client
            .execute(DELETE_MEMBER, &[&id])
            .await
            .map_err(|e| GymError::query_failed(format!("Failed to delete member {id}: {e}")))
    }

    async fn update(&self, id: Uuid, update: &FieldUpdate) -> Result<u64> {
        let result = match update {
            FieldUpdate::Name(v) => {
                self.client.execute("UPDATE users SET name = $1 WHERE id = $2", &[v, &id]).await
            }
            FieldUpdate::LastName(v) => {
                self.client
                    .execute("UPDATE users SET last_name = $1 WHERE id = $2", &[v, &id])
                    .await
            }
            FieldUpdate::Age(v) => {
                self.client.execute("UPDATE users SET age = $1 WHERE id = $2", &[v, &id]).await
            }
            FieldUpdate::Height(v) => {
                self.client.execute("UPDATE users SET height = $1 WHERE id = $2", &[v, &id]).await
            }
            FieldUpdate::Weight(v) => {
                self.client
                    .execute("UPDATE users SET weight = $1::float8 WHERE id = $2", &[v, &id])
                    .await
            }
            FieldUpdate::Gender(v) => {
                self.client
                    .execute("UPDATE users SET gender = $1 WHERE id = $2", &[&v.as_str(), &id])
                    .await
            }
            FieldUpdate::Plan(v) => {
                self.client
                    .execute("UPDATE users SET plan = $1 WHERE id = $2", &[&v.as_str(), &id])
                    .await
            }
            FieldUpdate::SkillLevel(v) => {
                self.client
                    .execute("UPDATE users SET skill_level = $1 WHERE id = $2", &[&v.as_str(), &id])
                    .await
            }
        };

        result.map_err(|e| {
            GymError::query_failed(format!("Failed to update {} for member {id}: {e}", update.column()))
        })
    }
}

/// Build `PostgreSQL` connection config from `DbConfig`
///
/// Empty host/user/password/dbname are passed through to the driver.
fn build_pg_config(config: &DbConfig) -> Result<Config> {
    let port = config.port_number()?;
    let tls_mode = parse_ssl_mode(&config.ssl_mode)?;

    let mut pg_config = Config::new();
    pg_config
        .host(&config.host)
        .port(port)
        .user(&config.user)
        .password(&config.password)
        .dbname(&config.dbname)
        .ssl_mode(tls_mode.driver_mode());

    Ok(pg_config)
}

/// Accepted `SSL_MODE` values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Plain TCP only
    Disable,
    /// TLS when the server offers it, unverified
    Prefer,
    /// TLS required, certificate not verified
    Require,
    /// TLS required, certificate chain verified, hostname not checked
    VerifyCa,
    /// TLS required, certificate chain and hostname verified
    VerifyFull,
}

impl TlsMode {
    /// The driver only negotiates; verification lives in the connector
    fn driver_mode(self) -> SslMode {
        match self {
            Self::Disable => SslMode::Disable,
            Self::Prefer => SslMode::Prefer,
            Self::Require | Self::VerifyCa | Self::VerifyFull => SslMode::Require,
        }
    }

    fn connector(self) -> Result<MakeTlsConnector> {
        let mut builder = TlsConnector::builder();
        match self {
            Self::Disable | Self::Prefer | Self::Require => {
                builder.danger_accept_invalid_certs(true).danger_accept_invalid_hostnames(true);
            }
            Self::VerifyCa => {
                builder.danger_accept_invalid_hostnames(true);
            }
            Self::VerifyFull => {}
        }

        let connector = builder.build().map_err(|e| {
            GymError::config_error(format!("Failed to initialize TLS for {SSL_MODE}: {e}"))
        })?;
        Ok(MakeTlsConnector::new(connector))
    }
}

/// Map `SSL_MODE` onto [`TlsMode`]; empty means `prefer`
fn parse_ssl_mode(value: &str) -> Result<TlsMode> {
    match value.trim() {
        "" | "prefer" => Ok(TlsMode::Prefer),
        "disable" => Ok(TlsMode::Disable),
        "require" => Ok(TlsMode::Require),
        "verify-ca" => Ok(TlsMode::VerifyCa),
        "verify-full" => Ok(TlsMode::VerifyFull),
        other => Err(GymError::config_error(format!(
            "{SSL_MODE} must be one of disable, prefer, require, verify-ca, verify-full; got '{other}'"
        ))),
    }
}
