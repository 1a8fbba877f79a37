use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use runtime::{AppConfig, CliArgs, Profile, MEMORY_DSN};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

use api_ingress::{ApiIngress, ApiIngressConfig};
use emails::api::graphql::{build_schema, routes::register_routes};
use emails::domain::service::Service;
use emails::gateways::local::EmailsLocalClient;
use emails::infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmEmailsRepository};

mod shutdown;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case(MEMORY_DSN) || dsn.eq_ignore_ascii_case("sqlite://:memory:") {
        return Ok(MEMORY_DSN.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if create_dirs {
        if let Some(dir) = p.parent() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Emails Server - GraphQL CRUD service for email records
#[derive(Parser)]
#[command(name = "emails-server")]
#[command(about = "Emails Server - GraphQL CRUD service for email records")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    /// Configuration profile: "default" or "test"
    #[arg(long)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
        profile: cli.profile.as_deref().map(Profile::parse).transpose()?,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let base_dir = std::env::current_dir().context("Failed to resolve working directory")?;
    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, &base_dir);
    tracing::info!(profile = ?config.profile, "Emails server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args, &base_dir).await,
        Commands::Check => check_config(config, args),
    }
}

/// Detect DB backend from URL scheme.
fn detect_from_dsn(dsn: &str) -> Result<&'static str> {
    let raw = dsn.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" | "sqlite3" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

fn resolve_dsn(config: &AppConfig, args: &CliArgs) -> Result<String> {
    let dsn = config
        .database_url(args.mock)
        .ok_or_else(|| anyhow!("Database URL not configured"))?;
    detect_from_dsn(&dsn)?;
    Ok(dsn)
}

/// Keeps the single in-memory connection from being reaped.
const MEMORY_KEEPALIVE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Pool sizing and connection lifetimes for a DSN.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PoolSettings {
    max_conns: Option<u32>,
    min_conns: Option<u32>,
    idle_timeout: Option<Duration>,
    max_lifetime: Option<Duration>,
}

impl PoolSettings {
    fn for_dsn(dsn: &str, max_conns: Option<u32>) -> Self {
        // every connection to sqlite::memory: is its own database, and closing
        // the last one drops the migrated schema
        if dsn == MEMORY_DSN {
            return Self {
                max_conns: Some(1),
                min_conns: Some(1),
                idle_timeout: Some(MEMORY_KEEPALIVE),
                max_lifetime: Some(MEMORY_KEEPALIVE),
            };
        }
        Self {
            max_conns,
            min_conns: None,
            idle_timeout: None,
            max_lifetime: None,
        }
    }

    fn apply(&self, opts: &mut ConnectOptions) {
        if let Some(n) = self.max_conns {
            opts.max_connections(n);
        }
        if let Some(n) = self.min_conns {
            opts.min_connections(n);
        }
        if let Some(t) = self.idle_timeout {
            opts.idle_timeout(t);
        }
        if let Some(t) = self.max_lifetime {
            opts.max_lifetime(t);
        }
    }
}

async fn connect(dsn: &str, max_conns: Option<u32>) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(dsn.to_owned());
    opts.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    PoolSettings::for_dsn(dsn, max_conns).apply(&mut opts);

    tracing::info!("Connecting to database: {}", dsn);
    let db = Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to database '{dsn}'"))?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    Ok(db)
}

async fn run_server(config: AppConfig, args: CliArgs, base_dir: &Path) -> Result<()> {
    let mut dsn = resolve_dsn(&config, &args)?;
    if dsn.starts_with("sqlite://") {
        dsn = absolutize_sqlite_dsn(&dsn, base_dir, true)?;
    }
    let max_conns = config.database.as_ref().and_then(|d| d.max_conns);
    let db = connect(&dsn, max_conns).await?;

    let repo = Arc::new(SeaOrmEmailsRepository::new(db.clone()));
    let service = Arc::new(Service::new(repo));
    let client = Arc::new(EmailsLocalClient::new(service));
    let schema = build_schema(client);

    let routes = register_routes(
        axum::Router::new(),
        schema,
        config.server.enable_playground,
    );

    let ingress = ApiIngress::new(ApiIngressConfig {
        bind_addr: format!("{}:{}", config.server.host, config.server.port),
        cors_enabled: config.server.cors_enabled,
        timeout_sec: config.server.timeout_sec,
        ..ApiIngressConfig::default()
    });
    let router = ingress.build_router(routes);

    let cancel = CancellationToken::new();
    shutdown::cancel_on_signal(cancel.clone());

    let served = ingress.serve(router, cancel).await;

    if let Err(e) = db.close().await {
        tracing::warn!(error = %e, "Failed to close database connection");
    }
    tracing::info!("Emails server stopped");
    served
}

fn check_config(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    let dsn = resolve_dsn(&config, &args)?;
    let backend = detect_from_dsn(&dsn)?;
    let bind = format!("{}:{}", config.server.host, config.server.port);
    bind.parse::<std::net::SocketAddr>()
        .map_err(|e| anyhow!("Invalid bind address '{}': {}", bind, e))?;

    tracing::info!(backend, "Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_dsn_is_kept() {
        let base = Path::new("/srv");
        assert_eq!(
            absolutize_sqlite_dsn("sqlite::memory:", base, false).unwrap(),
            MEMORY_DSN
        );
        assert_eq!(
            absolutize_sqlite_dsn("sqlite://:memory:", base, false).unwrap(),
            MEMORY_DSN
        );
    }

    #[test]
    fn relative_sqlite_path_is_anchored_and_keeps_query() {
        let dir = tempfile::tempdir().unwrap();
        let dsn = absolutize_sqlite_dsn("sqlite://data/emails.db?mode=rwc", dir.path(), true)
            .unwrap();
        let expected = dir.path().join("data").join("emails.db");
        assert_eq!(
            dsn,
            format!(
                "sqlite://{}?mode=rwc",
                expected.to_string_lossy().replace('\\', "/")
            )
        );
        assert!(dir.path().join("data").is_dir());
    }

    #[test]
    fn non_sqlite_dsn_is_rejected_by_absolutize() {
        assert!(absolutize_sqlite_dsn("postgres://x/y", Path::new("/"), false).is_err());
        assert!(absolutize_sqlite_dsn("sqlite://", Path::new("/"), false).is_err());
    }

    #[test]
    fn backend_detection() {
        assert_eq!(detect_from_dsn("sqlite://emails.db").unwrap(), "sqlite");
        assert_eq!(detect_from_dsn(MEMORY_DSN).unwrap(), "sqlite");
        assert_eq!(
            detect_from_dsn("postgresql://localhost/emails").unwrap(),
            "postgres"
        );
        assert!(detect_from_dsn("mysql://localhost/emails").is_err());
        assert!(detect_from_dsn("   ").is_err());
        assert!(detect_from_dsn("not a url").is_err());
    }

    #[test]
    fn memory_pool_is_pinned_to_one_long_lived_connection() {
        let settings = PoolSettings::for_dsn(MEMORY_DSN, Some(10));
        assert_eq!(settings.max_conns, Some(1));
        assert_eq!(settings.min_conns, Some(1));
        // well past sqlx's 10 min idle / 30 min lifetime defaults
        let day = Duration::from_secs(24 * 60 * 60);
        assert!(settings.idle_timeout.unwrap() > day);
        assert!(settings.max_lifetime.unwrap() > day);
    }

    #[test]
    fn file_pool_keeps_configured_size_and_default_lifetimes() {
        let settings = PoolSettings::for_dsn("sqlite://emails.db?mode=rwc", Some(10));
        assert_eq!(
            settings,
            PoolSettings {
                max_conns: Some(10),
                min_conns: None,
                idle_timeout: None,
                max_lifetime: None,
            }
        );
    }

    #[tokio::test]
    async fn memory_database_keeps_schema_across_queries() {
        use emails::domain::repo::EmailsRepository;
        use emails::model::Email;

        let db = connect(MEMORY_DSN, Some(10)).await.unwrap();
        let repo = SeaOrmEmailsRepository::new(db);
        repo.insert(Email {
            id: sea_orm::prelude::Uuid::new_v4(),
            email: "a@b.com".to_owned(),
            name: "A".to_owned(),
        })
        .await
        .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
        assert!(repo.find_by_email("a@b.com").await.unwrap().is_some());
    }

    #[test]
    fn mock_overrides_configured_database() {
        let config = AppConfig::default();
        let args = CliArgs {
            mock: true,
            ..CliArgs::default()
        };
        assert_eq!(resolve_dsn(&config, &args).unwrap(), MEMORY_DSN);
    }

    #[test]
    fn test_profile_without_test_url_uses_memory() {
        let config = AppConfig {
            profile: Profile::Test,
            ..AppConfig::default()
        };
        assert_eq!(resolve_dsn(&config, &CliArgs::default()).unwrap(), MEMORY_DSN);
    }
}
