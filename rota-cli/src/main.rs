//! Rota CLI - Command line interface for Reviewer Rota
//!
//! Runs the HTTP API and exposes the same operations as subcommands against
//! the local database.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rota_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{PrArgs, ServeArgs, TeamArgs, UserArgs};

/// Reviewer Rota: automatic pull request reviewer assignment
#[derive(Parser, Debug)]
#[command(name = "rota")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the SQLite database (overrides config and env)
    #[arg(long, global = true, env = "ROTA_DATABASE")]
    database: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Run the HTTP API
    #[command(visible_alias = "s")]
    Serve(ServeArgs),

    /// Manage teams
    Team(TeamArgs),

    /// Manage users
    User(UserArgs),

    /// Create, merge and reassign pull requests
    Pr(PrArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.config.as_deref(), cli.database.clone(), None)?;

    if cli.verbose {
        tracing::info!(
            database = %config.database.path.display(),
            bind = %config.server.bind,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("rota {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Serve(args)) => {
            args.execute(config).await?;
        }
        Some(Commands::Team(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::User(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Pr(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Config) => {
            println!("Rota Configuration");
            println!("==================");
            println!();
            println!("Database:");
            println!("  path: {}", config.database.path.display());
            println!("  max_connections: {}", config.database.max_connections);
            println!("  busy_timeout: {:?}", config.database.busy_timeout);
            println!("  acquire_timeout: {:?}", config.database.acquire_timeout);
            println!();
            println!("Server:");
            println!("  bind: {}", config.server.bind);
            println!();
            let path = cli.config.clone().or_else(Config::default_config_path);
            if let Some(path) = path {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Reviewer Rota - automatic pull request reviewer assignment");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
