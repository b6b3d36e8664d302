//! CLI administration tool for url-registry.
//!
//! Shortens and resolves URLs and performs database operations directly
//! against the configured PostgreSQL store, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/page
//!
//! # Look up a short code
//! cargo run --bin admin -- resolve ungWv48Bz
//!
//! # Create the mapping table
//! cargo run --bin admin -- db init
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components),
//! `DB_TABLE_NAME`, `BASE_URL`.

use url_registry::application::services::UrlService;
use url_registry::config::{self, Config, StorageBackend};
use url_registry::infrastructure::persistence::{PgMappingRepository, quote_identifier};
use url_registry::server::connect_pool;
use url_registry::utils::code_generator::Sha256CodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a long URL
    Shorten {
        /// Absolute http(s) URL to shorten
        url: String,
    },

    /// Print the long URL stored for a short code
    Resolve {
        /// Short code to look up
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Create the mapping table if it does not exist
    Init,

    /// Show database info and mapping count
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("The admin tool requires STORAGE_BACKEND=postgres");
    }

    let pool = Arc::new(connect_pool(&config).await?);
    let repository = PgMappingRepository::new(pool.clone(), &config.table_name);

    match cli.command {
        Commands::Shorten { url } => handle_shorten(repository, &config, &url).await?,
        Commands::Resolve { code } => handle_resolve(repository, &code).await?,
        Commands::Db { action } => handle_db_action(action, repository, &pool, &config).await?,
    }

    Ok(())
}

fn url_service(repository: PgMappingRepository) -> UrlService {
    UrlService::new(Arc::new(repository), Arc::new(Sha256CodeGenerator::new()))
}

async fn handle_shorten(repository: PgMappingRepository, config: &Config, url: &str) -> Result<()> {
    let service = url_service(repository);

    let mapping = service.shorten_url(url).await?;
    let short_url = service.short_url(&config.base_url, &mapping.short_code);

    println!();
    println!("{}", "✅ URL shortened!".green().bold());
    println!();
    println!("  Long URL:  {}", mapping.long_url.bright_white());
    println!("  Code:      {}", mapping.short_code.bright_yellow().bold());
    println!("  Short URL: {}", short_url.bright_cyan());
    println!();

    Ok(())
}

async fn handle_resolve(repository: PgMappingRepository, code: &str) -> Result<()> {
    let long_url = url_service(repository).resolve_url(code).await?;

    println!("{}", long_url);

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    repository: PgMappingRepository,
    pool: &PgPool,
    config: &Config,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Init => {
            println!(
                "{} {}",
                "🛠  Creating table".bright_blue(),
                config.table_name.bright_white()
            );

            repository.ensure_schema().await?;

            println!("{}", "✅ Schema ready".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let count_sql = format!(
                "SELECT COUNT(*) FROM {}",
                quote_identifier(&config.table_name)
            );
            let mappings: i64 = sqlx::query_scalar(&count_sql)
                .fetch_one(pool)
                .await
                .context("Mapping table missing; run `admin db init`")?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Table:      {}", config.table_name.bright_white());
            println!(
                "  Mappings:   {}",
                mappings.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
