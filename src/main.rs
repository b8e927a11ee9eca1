//! gymdb CLI Entry Point
//!
//! Loads the connection settings, opens the store, makes sure the `users`
//! table exists, then runs exactly one interactive operation
//! (`addUser`, `deleteUser` or `editUser`).
//!
//! Prompts go to stdout. Logs go to stderr. Any error is logged and the
//! process exits with status 1.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use gymdb::cli::Session;
use gymdb::config::DEFAULT_ENV_FILE;
use gymdb::{MemberRepository, Result};

/// gymdb - Gym member records from the terminal
#[derive(Parser)]
#[command(name = "gymdb")]
#[command(about = "Add, edit and delete gym member records")]
#[command(version)]
struct Cli {
    /// Environment file holding DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME, SSL_MODE
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Use a local SQLite database file instead of PostgreSQL
    #[arg(long, value_name = "PATH")]
    sqlite: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = gymdb::logging::init_tracing(cli.debug) {
        eprintln!("Failed to initialize logging: {err}");
    }

    if let Err(err) = run(cli).await {
        tracing::error!(code = err.error_code(), "{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let stdin = std::io::stdin();
    let mut session = Session::new(stdin.lock(), std::io::stdout());

    match cli.sqlite {
        #[cfg(feature = "sqlite")]
        Some(path) => {
            let store = gymdb::engine::sqlite::SqliteStore::open(&path)?;
            serve(&store, &mut session).await
        }
        #[cfg(not(feature = "sqlite"))]
        Some(_) => Err(gymdb::GymError::config_error("gymdb was built without SQLite support")),

        #[cfg(feature = "postgres")]
        None => {
            gymdb::config::load_env_file(&cli.env_file)?;
            let config = gymdb::config::DbConfig::from_env();
            tracing::debug!(?config, "resolved connection settings");

            let store = gymdb::engine::postgres::PostgresStore::connect(&config).await?;
            serve(&store, &mut session).await
        }
        #[cfg(not(feature = "postgres"))]
        None => Err(gymdb::GymError::config_error(format!(
            "gymdb was built without PostgreSQL support; use --sqlite (env file {} ignored)",
            cli.env_file.display()
        ))),
    }
}

async fn serve<M, R, W>(repo: &M, session: &mut Session<R, W>) -> Result<()>
where
    M: MemberRepository,
    R: BufRead,
    W: Write,
{
    repo.ensure_schema().await?;

    match session.run(repo).await? {
        Some(operation) => {
            tracing::debug!(engine = %repo.engine(), operation = operation.command(), "done");
        }
        None => tracing::debug!("no operation selected"),
    }

    Ok(())
}
