mod bootstrap;

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use expsize_core::settings::{RunConfig, Settings};
use expsize_data::analysis::{analyze_file, AnalysisMetadata, AnalysisOptions};
use expsize_report::{render, Report};

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(settings.effective_log_level())?;

    tracing::info!("expsize v{} starting", env!("CARGO_PKG_VERSION"));

    // Every flag is validated before the source is touched.
    let config = settings.into_config()?;

    let (report, metadata) = analyze(&config)?;

    tracing::info!(
        "{} objects, {} bytes (from {} observations)",
        report.summary.total_files,
        report.summary.total_size_bytes,
        metadata.observations
    );

    let mut sink = bootstrap::open_output(config.output_file.as_deref())?;
    render(&report, config.output_mode, &mut sink)?;
    sink.flush()?;

    Ok(())
}

/// Run the streaming pipeline over the configured source and build the report.
fn analyze(config: &RunConfig) -> Result<(Report, AnalysisMetadata)> {
    let options = AnalysisOptions::from_config(config);
    let analysis = analyze_file(&config.source, &options)?;
    let report = Report::from_aggregator(&analysis.aggregator);
    Ok((report, analysis.metadata))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
