mod session;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mapcards")]
#[command(about = "Collect business listings from map search responses")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the record extractor over saved JSON bodies and print the records.
    Extract {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Source URL stamped on every record (defaults to the file path).
        #[arg(long)]
        source_url: Option<String>,
    },
    /// Feed saved response bodies through the collector and export the result.
    Replay {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Fetch URLs through the intercepting client, collect, and export.
    Collect {
        #[arg(required = true)]
        urls: Vec<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = mapcards_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Extract { files, source_url }) => {
            session::run_extract(&files, source_url.as_deref()).await?;
        }
        Some(Commands::Replay {
            files,
            limit,
            export_dir,
        }) => {
            session::run_replay(&config, &files, limit, export_dir).await?;
        }
        Some(Commands::Collect {
            urls,
            limit,
            export_dir,
        }) => {
            session::run_collect(&config, &urls, limit, export_dir).await?;
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}
