#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use command::{
    CheckInput, CheckStrategy, CommandStrategy, InfoStrategy, InitStrategy, ParseInput,
    ParseStrategy, TemplateStrategy, VersionStrategy,
};
use quickparse_config::Config;
use quickparse_runner::ReportFormat;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "quickparse")]
#[command(about = "Regex-template log parser and folder comparator", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a folder of logs, optionally comparing it against a reference folder
    Parse {
        /// YAML or JSON pattern file
        pattern_file: PathBuf,

        /// Folder with the files to parse
        target_dir: PathBuf,

        /// Reference folder to compare against
        #[arg(short = 'r', long)]
        reference: Option<PathBuf>,

        /// Label used for the keyword entry in reports
        #[arg(short = 'k', long)]
        keyword: Option<String>,

        /// Report format (yaml or json)
        #[arg(long)]
        format: Option<ReportFormat>,
    },
    /// Validate a pattern file
    Check {
        /// YAML or JSON pattern file
        pattern_file: PathBuf,
    },
    /// Print a starter pattern file
    Template,
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

fn log_filter(verbose: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match verbose {
        0 => Config::load().map_or_else(|_| "info".to_string(), |c| c.log_level),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Parse {
            pattern_file,
            target_dir,
            reference,
            keyword,
            format,
        } => {
            ParseStrategy
                .execute(ParseInput {
                    pattern_file,
                    target_dir,
                    reference_dir: reference,
                    keyword_label: keyword,
                    format,
                })
                .await
        }
        Commands::Check { pattern_file } => CheckStrategy.execute(CheckInput { pattern_file }).await,
        Commands::Template => TemplateStrategy.execute(()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
