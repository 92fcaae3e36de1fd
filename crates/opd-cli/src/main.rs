//! opd entry point.
//!
//! This file is intentionally thin: it sets up tracing, parses the
//! command tree, and dispatches. All command bodies live in `commands/`.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "opd")]
#[command(about = "OrderPad field order capture", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Catalog inspection
    Catalog {
        #[command(subcommand)]
        cmd: CatalogCmd,
    },

    /// Compute a draft's per-line amounts and category total
    Quote {
        /// Layered config paths in merge order
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,

        #[arg(long)]
        retailer: String,

        #[arg(long)]
        category: String,

        /// Quantity entry, repeatable: --qty "Chips=3"
        #[arg(long = "qty", value_name = "PRODUCT=N")]
        quantities: Vec<String>,
    },

    /// Build the submission batch and append it to the configured sink
    Submit {
        /// Layered config paths in merge order
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,

        #[arg(long)]
        retailer: String,

        #[arg(long)]
        category: String,

        /// Quantity entry, repeatable: --qty "Chips=3"
        #[arg(long = "qty", value_name = "PRODUCT=N")]
        quantities: Vec<String>,

        /// Captured latitude; must be given together with --lon
        #[arg(long, requires = "lon")]
        lat: Option<String>,

        /// Captured longitude; must be given together with --lat
        #[arg(long, requires = "lat")]
        lon: Option<String>,
    },

    /// Config utilities
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[derive(Subcommand)]
enum CatalogCmd {
    /// Load the catalog and print a summary (fails when unreachable)
    Check {
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,
    },

    /// List one category's products with prices, in catalog order
    Products {
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,

        #[arg(long)]
        category: String,
    },
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Compute the layered config hash + print canonical JSON
    Hash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if the file
    // does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Catalog { cmd } => match cmd {
            CatalogCmd::Check { config_paths } => commands::catalog::run_check(&config_paths),
            CatalogCmd::Products {
                config_paths,
                category,
            } => commands::catalog::run_products(&config_paths, &category),
        },
        Commands::Quote {
            config_paths,
            retailer,
            category,
            quantities,
        } => commands::order::run_quote(&config_paths, &retailer, &category, &quantities),
        Commands::Submit {
            config_paths,
            retailer,
            category,
            quantities,
            lat,
            lon,
        } => commands::order::run_submit(
            &config_paths,
            &retailer,
            &category,
            &quantities,
            lat.as_deref(),
            lon.as_deref(),
        ),
        Commands::Config { cmd } => match cmd {
            ConfigCmd::Hash { paths } => commands::config::run_hash(&paths),
        },
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
