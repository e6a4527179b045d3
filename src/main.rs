//! Vidsift CLI application entry point
//!
//! Walks a directory, probes every video file with ffprobe and prints the
//! ones matching the given criteria.
//!
//! # Usage
//!
//! ```bash
//! # Everything over 100 MiB
//! vidsift /media -size gte 100:mb
//!
//! # Long files, or anything in Matroska, that is at least 1080p
//! vidsift /media -- -duration gt 90:min -o -container mkv -a -height gte 1080
//!
//! # Also save the matches to /tmp/video-filelist.txt
//! vidsift --filelist /media -codec_name hevc
//!
//! # Only the paths, for scripting
//! vidsift -q /media -orientation portrait
//! ```
//!
//! # Configuration
//!
//! Defaults are read from the user's config directory
//! (`~/.config/vidsift/config.toml` on Linux) and `VIDSIFT_*` environment
//! variables. Set `RUST_LOG` to override the log filter.

use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidsift::{
    VidsiftError,
    cli::Cli,
    config::VidsiftConfig,
    criteria::CriteriaExpression,
    media::{FfprobeFetcher, VideoExtensionClassifier},
    output::{ConsoleSink, FileListSink, OutputError, ResultSink},
    scan::{MatchResult, ScanError, ScanOptions, Scanner},
};

type Result<T> = std::result::Result<T, VidsiftError>;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let result = load_config(&cli).and_then(|config| {
        init_logging(cli.log_filter(&config));
        run(&cli, &config)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with tracing. Logs go to stderr; stdout carries the
/// results.
fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<VidsiftConfig> {
    let mut config = match &cli.config {
        Some(path) => VidsiftConfig::load_from(path)?,
        None => VidsiftConfig::load()?,
    };
    cli.apply_to(&mut config);
    Ok(config)
}

fn run(cli: &Cli, config: &VidsiftConfig) -> Result<()> {
    tracing::debug!("Configuration: {config:?}");
    let expression = CriteriaExpression::from_args(&cli.criteria)?;

    if !cli.root.is_dir() {
        return Err(ScanError::NotADirectory(cli.root.clone()).into());
    }

    let classifier = VideoExtensionClassifier::new()
        .with_extra(&config.extra_extensions)
        .include_partial(config.include_partial);
    let options = ScanOptions::new()
        .with_concurrency(config.concurrency())
        .with_classifier(classifier)
        .follow_links(config.follow_links);
    let fetcher = Arc::new(FfprobeFetcher::new(config.ffprobe.clone()));
    let scanner = Scanner::new(fetcher, options)?;

    tracing::info!("Criteria: {expression}");

    let mut console = ConsoleSink::stdout(config.quiet);
    let mut filelist = cli
        .filelist_path(config)
        .and_then(|path| FileListSink::create(path, cli.append).map_err(report).ok());
    let mut console_error: Option<OutputError> = None;

    let summary = scanner.scan_with(&cli.root, &expression, |result| {
        let MatchResult::Matched(path) = result else {
            return;
        };
        if console_error.is_none()
            && let Err(e) = console.record_match(path)
        {
            console_error = Some(e);
        }
        if let Some(sink) = &mut filelist
            && let Err(e) = sink.record_match(path)
        {
            report(e);
            filelist = None;
        }
    })?;

    if let Some(e) = console_error {
        return Err(e.into());
    }

    if let Some(mut sink) = filelist
        && let Err(e) = sink.finish(&summary)
    {
        report(e);
    }

    console.finish(&summary)?;
    Ok(())
}

/// File list problems are reported but do not fail the run
fn report(e: OutputError) {
    eprintln!("{} {e}", "Error:".red().bold());
}
