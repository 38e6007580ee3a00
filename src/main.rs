use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

mod init;
mod search;

use docnav::config::{CONFIG_FILE, NavConfig, NearbyMode};
use init::init_config;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "docnav")]
#[command(about = "Sidebar search and navigation for generated API docs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Root of the generated docs site
    #[arg(short, long, global = true, default_value = ".")]
    docs: PathBuf,

    /// Configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Maximum number of search results (overrides docnav.toml)
    #[arg(long, global = true)]
    cap: Option<usize>,

    /// Group nearby classes as a package tree
    #[arg(long, global = true)]
    tree: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search class names in the index
    Search {
        /// Case-insensitive substring to look for
        query: String,
    },
    /// Show the classes around the one a page documents
    Nearby {
        /// Page title, e.g. "JavaPlugin - Hytale Plugin API"
        title: String,
    },
    /// Show the package breadcrumb trail of the class a page documents
    Breadcrumbs {
        /// Page title
        title: String,
    },
    /// Print the sidebar markup for a page, optionally after typing a query
    Sidebar {
        /// Page title
        title: String,
        /// Search input value
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Type queries against the sidebar of a page
    Interactive {
        /// Page title
        #[arg(short, long, default_value = "")]
        title: String,
    },
    /// Generate the search index from classes/*.html
    Index {
        /// Output file (defaults to the configured index path under --docs)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Initialize a new docnav.toml configuration file
    Init {
        /// Overwrite existing docnav.toml if present
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr to keep stdout clean
    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    let mut config = NavConfig::load(&cli.config);

    // CLI flags override config file
    if let Some(cap) = cli.cap.filter(|cap| *cap > 0) {
        config.result_cap = cap;
    }
    if cli.tree {
        config.nearby_mode = NearbyMode::Tree;
    }

    if let Err(e) = run(&cli, config).await {
        eprintln!("\n{} {}", "❌".red(), e.to_string().red());
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, config: NavConfig) -> Result<()> {
    match &cli.command {
        Commands::Search { query } => search::search(&cli.docs, &config, query).await,
        Commands::Nearby { title } => search::nearby(&cli.docs, &config, title).await,
        Commands::Breadcrumbs { title } => search::breadcrumbs(&cli.docs, &config, title).await,
        Commands::Sidebar { title, query } => {
            search::sidebar(&cli.docs, config, title, query.as_deref()).await
        }
        Commands::Interactive { title } => search::interactive(&cli.docs, config, title).await,
        Commands::Index { out } => {
            let out = out
                .clone()
                .unwrap_or_else(|| cli.docs.join(&config.index_path));
            search::build_index(&cli.docs, &out, cli.verbose)
        }
        Commands::Init { force } => init_config(&cli.config, *force),
    }
}
