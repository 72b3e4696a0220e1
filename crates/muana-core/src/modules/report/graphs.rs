//! Ratio graphs with asymmetric binomial uncertainties.

use super::model::{GraphPoint, RatioGraph};
use crate::domain::{AnalysisError, AnalysisResult, MuonCategory};
use crate::modules::histogram::{Hist1, HistogramSet};
use crate::numerics::clopper_pearson_interval;

/// Bin-by-bin ratio of two same-shape histograms as a graph with central
/// Clopper-Pearson intervals. Bins with an empty denominator produce no
/// point. Resolution smearing can migrate entries across bins and leave a
/// numerator above its denominator; such bins are clamped to unit ratio
/// with the interval of a fully-efficient bin.
pub fn ratio_graph(
    name: impl Into<String>,
    numerator: &Hist1,
    denominator: &Hist1,
    confidence_level: f64,
) -> AnalysisResult<RatioGraph> {
    if numerator.bins() != denominator.bins()
        || numerator.lo() != denominator.lo()
        || numerator.hi() != denominator.hi()
    {
        return Err(AnalysisError::ShapeMismatch(format!(
            "ratio of '{}' over '{}' with differing binning",
            numerator.name(),
            denominator.name()
        )));
    }

    let name = name.into();
    let mut points = Vec::new();
    for bin in 0..numerator.bins() {
        let total = denominator.content(bin).round() as u64;
        if total == 0 {
            continue;
        }
        // Migration across bin edges can leave more numerator than
        // denominator entries in a bin.
        let passed = numerator.content(bin).round() as u64;
        let passed = passed.min(total);

        let value = passed as f64 / total as f64;
        let (lower, upper) = clopper_pearson_interval(passed, total, confidence_level);
        points.push(GraphPoint {
            x: numerator.bin_center(bin),
            value,
            error_low: value - lower,
            error_high: upper - value,
        });
    }

    Ok(RatioGraph { name, points })
}

/// Reconstruction efficiency of a category versus a kinematic variable:
/// `{C}Muons_<var>` over `GenMuons_<var>`, optionally rebinned first.
pub fn efficiency_graph(
    set: &HistogramSet,
    category: MuonCategory,
    variable: &str,
    rebin: usize,
    confidence_level: f64,
) -> AnalysisResult<RatioGraph> {
    let numerator = set.hist1(&format!("{}Muons_{variable}", category.prefix()))?;
    let denominator = set.hist1(&format!("GenMuons_{variable}"))?;
    rebinned_ratio(
        format!("{}_eff_{variable}", category.prefix()),
        numerator,
        denominator,
        rebin,
        confidence_level,
    )
}

/// Fake rate versus production radius: a caller-named numerator over the
/// truth-muon vr distribution. The numerator lookup fails with
/// `UnknownHistogram` when the set does not carry it.
pub fn fake_rate_graph(
    set: &HistogramSet,
    numerator_name: &str,
    rebin: usize,
    confidence_level: f64,
) -> AnalysisResult<RatioGraph> {
    let numerator = set.hist1(numerator_name)?;
    let denominator = set.hist1("GenMuons_vr")?;
    rebinned_ratio(
        format!("fake_{numerator_name}"),
        numerator,
        denominator,
        rebin,
        confidence_level,
    )
}

fn rebinned_ratio(
    name: String,
    numerator: &Hist1,
    denominator: &Hist1,
    rebin: usize,
    confidence_level: f64,
) -> AnalysisResult<RatioGraph> {
    if rebin > 1 {
        let numerator = numerator.rebinned(rebin)?;
        let denominator = denominator.rebinned(rebin)?;
        ratio_graph(name, &numerator, &denominator, confidence_level)
    } else {
        ratio_graph(name, numerator, denominator, confidence_level)
    }
}
