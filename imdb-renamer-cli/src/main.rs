//! imdb-renamer CLI
//!
//! Renames movie folders to `Title (Year) - IMDb- Rating` using IMDb data.

mod cli_types;
mod console;
mod error;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use imdb_renamer_core::{Outcome, RunLogEntry, RunSummary, Settings};
use imdb_renamer_lib::{Orchestrator, RunLogSink};
use imdb_renamer_scraper::{ImdbBackend, MetadataClient};

use cli_types::Cli;
use console::TerminalConsole;
use error::CliError;
use logging::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Resolve settings with CLI flags taking priority over the settings file.
fn resolve_settings(cli: &Cli) -> Result<Settings, CliError> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(base) = &cli.base_path {
        settings.base_path = Some(base.clone());
    }
    if let Some(log_file) = &cli.log_file {
        settings.log_file = log_file.clone();
    }
    if let Some(workers) = cli.workers {
        settings.thread_pool_workers = workers;
    }
    Ok(settings)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = resolve_settings(&cli)?;
    let base_path = settings.validate()?;

    let sink = RunLogSink::open(&settings.log_file).map_err(|source| CliError::LogFile {
        path: settings.log_file.clone(),
        source,
    })?;

    log::info!(
        "Renaming folders in: {}",
        base_path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if cli.dry_run {
        log::info!(
            "{}",
            "Dry run: no folders will be renamed".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::debug!("Settings: {:?}", settings);

    let backend = ImdbBackend::new(&settings)?;
    let client = MetadataClient::new(backend, &settings);
    let orchestrator = Orchestrator::new(&settings, client, TerminalConsole, sink);

    let entries = orchestrator.run(&base_path, cli.dry_run).await?;
    print_results(&entries, cli.dry_run);
    Ok(())
}

/// Printed straight to stdout rather than logged, so `--quiet` still shows
/// the counts.
fn print_results(entries: &[RunLogEntry], dry_run: bool) {
    print!("{}", format_summary(entries, dry_run));
}

fn format_summary(entries: &[RunLogEntry], dry_run: bool) -> String {
    let summary = RunSummary::from_entries(entries);
    let renamed_label = if dry_run { "would rename" } else { "renamed" };

    let mut out = String::from("\n");
    out += &format!("{}\n", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    out += &format!(
        "  {} {} {}\n",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.renamed,
        renamed_label,
    );
    out += &format!(
        "  {} {} skipped\n",
        "-".if_supports_color(Stdout, |t| t.dimmed()),
        summary.skipped,
    );
    if summary.failed > 0 {
        out += &format!(
            "  {} {} failed\n",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            summary.failed,
        );
        for entry in entries.iter().filter(|e| e.outcome == Outcome::Failed) {
            out += &format!(
                "    {}: {}\n",
                entry.folder_name(),
                entry.detail.as_deref().unwrap_or("unknown error"),
            );
        }
    }
    out
}
