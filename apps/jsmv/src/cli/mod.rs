//! CLI command handling for jsmv

use anyhow::Context;
use clap::Parser;
use jsmv_config::{logging, AppConfig, ResolutionConfig};
use jsmv_foundation::paths::to_absolute;
use jsmv_foundation::MoveReport;
use jsmv_services::MoveService;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const USAGE: &str = "Usage: jsmv [OPTIONS] <SOURCE> <DESTINATION>";

/// The main CLI struct.
#[derive(Parser)]
#[command(name = "jsmv")]
#[command(about = "Move a JavaScript file or directory and update every reference to it")]
#[command(version)]
pub struct Cli {
    /// File or directory to move
    pub source: PathBuf,

    /// New path; an existing directory receives the source under its own name
    pub destination: PathBuf,

    /// Project root scanned for references (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Show what would change without writing or moving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output format (pretty or json)
    #[arg(long, default_value = "pretty", value_parser = ["pretty", "json"])]
    pub format: String,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let root = cli
        .root
        .as_deref()
        .map(|r| to_absolute(r, &cwd))
        .unwrap_or_else(|| cwd.clone());

    let config = AppConfig::load(&root).context("Failed to load configuration")?;
    logging::initialize(&config);
    debug!(root = %root.display(), "Using project root");

    let resolution = ResolutionConfig::load(&root);
    let service = MoveService::from_config(&root, &config, resolution);

    let report = service.move_path(&cli.source, &cli.destination, &cwd, cli.dry_run)?;

    match cli.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_report(&report, &root),
    }
    Ok(())
}

fn print_report(report: &MoveReport, root: &Path) {
    for record in &report.rewrites {
        println!(
            "update file: {}\n  {}\n->{}\n",
            display_path(&record.file, root),
            record.original,
            record.replacement
        );
    }

    let verb = if report.dry_run { "Would move" } else { "Moved" };
    println!(
        "{} {} -> {} ({} files updated)",
        verb,
        display_path(&report.source, root),
        display_path(&report.destination, root),
        report.files_updated.len()
    );
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
