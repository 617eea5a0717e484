use anyhow::{bail, Context};
use clap::Parser;
use rdcompare_common::{load_config, AppConfig, OverflowPolicy, RunReport, RunStats};
use rdcompare_core::{ComparisonEngine, ExternalDiff};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rdcompare")]
#[command(author = "RdCompare Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Compare the text files of two ramdisk directory trees", long_about = None)]
struct Cli {
    /// Use colordiff instead of diff
    #[arg(short = 'c', long)]
    color: bool,

    /// First ramdisk directory (side A)
    left: PathBuf,

    /// Second ramdisk directory (side B)
    right: PathBuf,

    /// Sort directory listings by name for a stable pairing order
    #[arg(short, long)]
    sort: bool,

    /// Diff program to run on each pair (overrides -c)
    #[arg(long, value_name = "CMD")]
    diff_tool: Option<String>,

    /// Options passed to the diff program
    #[arg(long, value_name = "OPTS", allow_hyphen_values = true)]
    diff_options: Option<String>,

    /// Maximum number of entries collected per tree (at most 128)
    #[arg(long, value_name = "N")]
    max_entries: Option<usize>,

    /// Fail instead of truncating when a tree exceeds its capacity
    #[arg(long)]
    strict_capacity: bool,

    /// Print the matched pairs and statistics as JSON without running the diff program
    #[arg(long)]
    json: bool,

    /// Configuration file (defaults to the per-user rdcompare.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    // Logs go to stderr so stdout only carries pair lines and diff output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn"))
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("Comparison failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    for path in [&cli.left, &cli.right] {
        if !path.is_dir() {
            bail!("Specified path {} is not a valid directory", path.display());
        }
    }

    let loaded = load_config(cli.config.as_deref())?;
    if let Some(path) = loaded.path.as_ref().filter(|_| loaded.exists) {
        info!("Using configuration from {}", path.display());
    }
    let config = apply_overrides(loaded.config, &cli);
    config.validate()?;

    let engine = ComparisonEngine::new(config);

    if cli.json {
        let report = engine.plan(&cli.left, &cli.right)?;
        let output = serde_json::to_string_pretty(&build_json_report(&cli.left, &cli.right, &report))?;
        println!("{output}");
        return Ok(());
    }

    let mut diff = ExternalDiff::from_config(engine.config(), cli.color);
    let stdout = io::stdout();
    let report = engine
        .run(&cli.left, &cli.right, &mut diff, stdout.lock())
        .with_context(|| format!("comparing {} with {}", cli.left.display(), cli.right.display()))?;

    log_summary(&report.stats);
    Ok(())
}

fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(tool) = &cli.diff_tool {
        config.diff_tool = tool.clone();
        config.color_diff_tool = tool.clone();
    }
    if let Some(options) = &cli.diff_options {
        config.diff_options = options.clone();
    }
    if let Some(max_entries) = cli.max_entries {
        config.max_entries = max_entries;
    }
    if cli.strict_capacity {
        config.overflow = OverflowPolicy::Error;
    }
    if cli.sort {
        config.sort_entries = true;
    }
    config
}

fn log_summary(stats: &RunStats) {
    info!(
        "{} pairs, {} diffed, {} without a side A file",
        stats.pairs, stats.diffs_invoked, stats.unmatched
    );
    for (label, side) in [("A", &stats.side_a), ("B", &stats.side_b)] {
        info!(
            "Side {}: {} entries, {} special skipped, {} over capacity, {} unreadable dirs, {} unclassified",
            label,
            side.entries,
            side.special_skipped,
            side.capacity_dropped,
            side.unreadable_dirs,
            side.unclassified
        );
    }
}

#[derive(Serialize)]
struct JsonReport {
    left: String,
    right: String,
    pairs: Vec<JsonPair>,
    stats: RunStats,
}

#[derive(Serialize)]
struct JsonPair {
    index: usize,
    left: Option<String>,
    right: String,
}

fn build_json_report(left: &Path, right: &Path, report: &RunReport) -> JsonReport {
    JsonReport {
        left: left.to_string_lossy().to_string(),
        right: right.to_string_lossy().to_string(),
        pairs: report
            .pairs
            .iter()
            .map(|pair| JsonPair {
                index: pair.index,
                left: pair
                    .left
                    .as_ref()
                    .map(|path| path.to_string_lossy().to_string()),
                right: pair.right.to_string_lossy().to_string(),
            })
            .collect(),
        stats: report.stats.clone(),
    }
}
