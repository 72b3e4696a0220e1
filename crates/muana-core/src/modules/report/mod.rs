//! Post-run reporting: derives efficiency, fake-rate, resolution and shape
//! comparison artifacts from two persisted histogram sets.

mod graphs;
mod model;
mod overlay;

pub use graphs::{efficiency_graph, fake_rate_graph, ratio_graph};
pub use model::{
    AnalysisReport, GraphPoint, RatioGraph, ResolutionOverlay, ResolutionSlice, ShapeComparison,
};
pub use overlay::{fold_overflow, normalized, resolution_overlay, shape_comparison};

use crate::common::constants::EFFICIENCY_CONFIDENCE_LEVEL;
use crate::domain::{AnalysisResult, MuonCategory, PileupCondition};
use crate::modules::histogram::HistogramSet;

/// Knobs of the report stage; cosmetics stay with the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Uniform rebin factor applied to efficiency and fake-rate inputs.
    pub rebin: usize,
    pub confidence_level: f64,
    /// Numerator name template for fake rates, `{}` replaced by the
    /// category prefix. The referenced histograms may be absent from the
    /// schema; absent numerators are skipped.
    pub fake_numerator_template: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            rebin: 1,
            confidence_level: EFFICIENCY_CONFIDENCE_LEVEL,
            fake_numerator_template: "{}Muons_noGen_vr".to_string(),
        }
    }
}

const EFFICIENCY_VARIABLES: [&str; 2] = ["vr", "pt"];
const COMPARISON_REBIN: usize = 2;

/// Assembles the full report from the two run conditions.
pub fn build_report(
    baseline: &HistogramSet,
    pileup: &HistogramSet,
    options: &ReportOptions,
) -> AnalysisResult<AnalysisReport> {
    let mut report = AnalysisReport::default();

    for (condition, set) in [
        (PileupCondition::NoPileup, baseline),
        (PileupCondition::HighPileup, pileup),
    ] {
        for category in MuonCategory::ALL {
            for variable in EFFICIENCY_VARIABLES {
                let mut graph = efficiency_graph(
                    set,
                    category,
                    variable,
                    options.rebin,
                    options.confidence_level,
                )?;
                graph.name = format!("{}_eff_{}_{}", category.prefix(), variable, condition);
                report.efficiencies.push(graph);
            }

            let numerator = options
                .fake_numerator_template
                .replace("{}", category.prefix());
            match fake_rate_graph(set, &numerator, options.rebin, options.confidence_level) {
                Ok(mut graph) => {
                    graph.name = format!("{}_fake_vr_{}", category.prefix(), condition);
                    report.fake_rates.push(graph);
                }
                Err(_) if set.hist1(&numerator).is_err() => {
                    report.skipped_fake_numerators.push(numerator);
                }
                Err(error) => return Err(error),
            }
        }
    }

    // Resolutions are drawn from the high-pileup run.
    for category in MuonCategory::ALL {
        report.resolutions.push(resolution_overlay(pileup, category)?);
    }

    for category in MuonCategory::ALL {
        let prefix = category.prefix();
        for variable in ["dR", "pt"] {
            report.comparisons.push(shape_comparison(
                baseline,
                pileup,
                &format!("{prefix}Muons_{variable}"),
                COMPARISON_REBIN,
            )?);
        }
    }
    report
        .comparisons
        .push(shape_comparison(baseline, pileup, "GenMuons_vr", 1)?);

    Ok(report)
}
