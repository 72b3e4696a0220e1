use super::CliError;
use super::plot;
use muana_core::common::AnalysisConfig;
use muana_core::modules::event::EventReader;
use muana_core::modules::histogram::HistogramSet;
use muana_core::modules::matcher::run_analysis;
use muana_core::modules::report::{ReportOptions, build_report};
use muana_core::modules::serialization::write_json_artifact;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct AnalyzeArgs {
    /// Event file (line-delimited JSON, collections header first)
    #[arg(long)]
    events: PathBuf,

    /// Analysis configuration JSON; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output histogram artifact path
    #[arg(long, default_value = "MyMuonPlots.json")]
    output: PathBuf,
}

#[derive(clap::Args)]
pub(super) struct ReportArgs {
    /// No-pileup histogram artifact
    #[arg(long)]
    baseline: PathBuf,

    /// High-pileup histogram artifact
    #[arg(long)]
    pileup: PathBuf,

    /// Output directory for the report artifact and figures
    #[arg(long, default_value = "report")]
    out_dir: PathBuf,

    /// Rebin factor applied to efficiency and fake-rate inputs
    #[arg(long, default_value = "1")]
    rebin: usize,

    /// Confidence level of the binomial ratio intervals
    #[arg(long, default_value = "0.6827")]
    confidence: f64,
}

pub(super) fn run_analyze_command(args: AnalyzeArgs) -> Result<i32, CliError> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };

    let reader = EventReader::open(&args.events, &config.sources)?;
    for source in reader.missing_optional_sources() {
        tracing::warn!("event file does not carry optional collection '{source}'");
    }

    let mut set = HistogramSet::new(&config.pt_bin_edges);
    let summary = run_analysis(reader, &config, &mut set)?;
    set.write_to_file(&args.output)?;

    tracing::info!(
        "analyzed {} events, {} truth muons filled",
        summary.events,
        summary.truth_muons_filled
    );
    println!("Histogram set: {}", args.output.display());
    Ok(0)
}

pub(super) fn run_report_command(args: ReportArgs) -> Result<i32, CliError> {
    if args.rebin == 0 {
        return Err(CliError::Usage(
            "Invalid rebin factor '0'; expected a positive integer.".to_string(),
        ));
    }
    if !(args.confidence > 0.0 && args.confidence < 1.0) {
        return Err(CliError::Usage(format!(
            "Invalid confidence level '{}'; expected a value in (0, 1).",
            args.confidence
        )));
    }

    let baseline = HistogramSet::read_from_file(&args.baseline)?;
    let pileup = HistogramSet::read_from_file(&args.pileup)?;

    let options = ReportOptions {
        rebin: args.rebin,
        confidence_level: args.confidence,
        ..ReportOptions::default()
    };
    let report = build_report(&baseline, &pileup, &options)?;

    for numerator in &report.skipped_fake_numerators {
        tracing::warn!("fake-rate numerator '{numerator}' is absent; graph skipped");
    }

    let report_path = args.out_dir.join("report.json");
    write_json_artifact(&report_path, &report)?;
    let figures = plot::render_report_figures(&args.out_dir, &report)
        .and_then(|count| {
            Ok(count + plot::render_truth_reco_heatmaps(&args.out_dir, &pileup)?)
        })
        .map_err(|error| anyhow::anyhow!("figure rendering failed: {error}"))?;

    tracing::info!(
        "report carries {} ratio graphs, {} resolution overlays, {} comparisons",
        report.efficiencies.len() + report.fake_rates.len(),
        report.resolutions.len(),
        report.comparisons.len()
    );
    println!("Report: {}", report_path.display());
    println!("Figures: {} under {}", figures, args.out_dir.display());
    Ok(0)
}
