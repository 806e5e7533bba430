mod cli_args;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use cli_args::{Command, CommandLineArgs};
use google_url_cleaner::common::constants::{PROGRESS_BAR_CHARS, PROGRESS_BAR_TEMPLATE};
use google_url_cleaner::file_ops::{collect_markdown_paths, read_paths};
use google_url_cleaner::{FsStore, LineTransformer, Processor, RunSummary, Settings};

fn main() -> Result<()> {
    let cli_args = CommandLineArgs::parse_args();

    let level = if cli_args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let start_time = Instant::now();
    debug!(
        "Google URL Cleaner v{} starting up...",
        env!("CARGO_PKG_VERSION")
    );
    cli_args.log_summary();

    debug!("Loading application settings...");
    let settings = Settings::resolve(cli_args.settings.as_deref())?;

    let paths = match &cli_args.command {
        Command::Pipe => return pipe_stdin(&settings),
        Command::FilesFromDir { dir } => collect_markdown_paths(dir, settings.extension())
            .with_context(|| format!("Failed to collect files under {}", dir.display()))?,
        Command::PathsFromStdin => {
            read_paths(io::stdin().lock()).context("Failed to read file paths from stdin")?
        }
    };
    info!("Found {} files to process", paths.len());

    let report_path = cli_args
        .report
        .clone()
        .unwrap_or_else(|| settings.report_path.clone());

    let summary = process_all_files(&paths, &settings, cli_args.dry_run, report_path)?;
    finish_processing(&summary);

    info!(
        "Processing completed in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn pipe_stdin(settings: &Settings) -> Result<()> {
    let transformer = LineTransformer::new(settings.policy());
    let changed = transformer
        .clean_stream(io::stdin().lock(), io::stdout().lock())
        .context("Failed to clean stdin")?;
    debug!("Cleaned {} line(s) from stdin", changed);
    Ok(())
}

fn process_all_files(
    paths: &[PathBuf],
    settings: &Settings,
    dry_run: bool,
    report_path: PathBuf,
) -> Result<RunSummary> {
    let pb = create_progress_bar(paths.len());

    let mut processor = Processor::new(settings, FsStore).with_dry_run(dry_run);
    processor.run(paths, &pb);
    pb.finish_and_clear();

    let summary = processor
        .finish(&report_path)
        .context("Files were cleaned but the report could not be written")?;
    Ok(summary)
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        pb.set_style(style.progress_chars(PROGRESS_BAR_CHARS));
    }
    pb
}

fn finish_processing(summary: &RunSummary) {
    info!(
        "Completed! {} processed, {} modified, {} failed",
        summary.processed,
        summary.modified,
        summary.failures.len()
    );

    if summary.failures.is_empty() {
        info!("All {} files processed successfully!", summary.total());
    } else {
        warn!(
            "Processing completed with {} failed files out of {} ({:.0}% succeeded)",
            summary.failures.len(),
            summary.total(),
            summary.success_rate()
        );
    }

    match &summary.report_path {
        Some(path) => info!(
            "{} remaining parameter(s) listed in {}",
            summary.remaining_params,
            path.display()
        ),
        None => info!("No remaining parameters to report"),
    }
}
