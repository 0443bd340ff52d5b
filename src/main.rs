//! # partprice CLI
//!
//! ```bash
//! partprice --config ./config/partprice.toml <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `partprice init` | Create the SQLite database and schema |
//! | `partprice seed` | Load component spec files into an empty database |
//! | `partprice list` | List stored components with their prices |
//! | `partprice price --type T --name N` | Price one stored component |
//! | `partprice estimate --type T <file>` | Price a spec file without the database |
//! | `partprice serve` | Start the HTTP price server |
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (default `partprice=info,tower_http=info`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use partprice::{config, db, estimate, lookup, migrate, seed, server};

/// partprice — prices PC hardware components from their stored
/// specifications.
#[derive(Parser)]
#[command(
    name = "partprice",
    about = "Price PC hardware components from their stored specifications",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When the file does not exist, built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/partprice.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema. Idempotent.
    Init,

    /// Load spec files from `[seed].specs_dir` into the database.
    ///
    /// Does nothing when the database already holds components, unless
    /// `--force` is given.
    Seed {
        /// Delete all stored components and reload them from disk.
        #[arg(long)]
        force: bool,
    },

    /// List stored components and their computed prices.
    List {
        /// Only list components of this type (e.g. `CPU`).
        #[arg(long = "type")]
        component_type: Option<String>,
    },

    /// Look up one stored component and print its price.
    Price {
        /// Component type tag (e.g. `GPU`).
        #[arg(long = "type")]
        component_type: String,

        /// Component name, exactly as stored.
        #[arg(long)]
        name: String,
    },

    /// Price a JSON spec file directly, without touching the database.
    Estimate {
        /// Component type tag (e.g. `Storage`).
        #[arg(long = "type")]
        component_type: String,

        /// Path to the JSON spec file.
        file: PathBuf,
    },

    /// Start the HTTP price server.
    ///
    /// Creates the schema and seeds an empty database before binding to
    /// `[server].bind`.
    Serve,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "partprice=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let cfg = config::load_or_minimal(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let pool = db::connect(&cfg).await?;
            let migrated = migrate::run_migrations(&pool).await;
            pool.close().await;
            migrated?;
            println!("Database initialized successfully.");
        }
        Commands::Seed { force } => {
            seed::run_seed(&cfg, force).await?;
        }
        Commands::List { component_type } => {
            lookup::run_list(&cfg, component_type.as_deref()).await?;
        }
        Commands::Price {
            component_type,
            name,
        } => {
            lookup::run_price(&cfg, &component_type, &name).await?;
        }
        Commands::Estimate {
            component_type,
            file,
        } => {
            estimate::run_estimate(&cfg, &component_type, &file)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
