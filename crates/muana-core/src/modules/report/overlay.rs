//! Shape post-processing for overlay rendering: overflow folding,
//! normalization, pileup comparisons and resolution slices.

use super::model::{ResolutionOverlay, ResolutionSlice, ShapeComparison};
use crate::domain::{AnalysisError, AnalysisResult, MuonCategory};
use crate::modules::histogram::{Hist1, HistogramSet};

/// Appends one extra visible bin holding the overflow mass, so rendering a
/// bounded axis drops no weight. The underflow and the entry count carry
/// over unchanged from the source.
pub fn fold_overflow(hist: &Hist1) -> Hist1 {
    let width = hist.bin_width();
    let mut folded = Hist1::new(
        format!("{}_overflow", hist.name()),
        hist.bins() + 1,
        hist.lo(),
        hist.hi() + width,
    );
    for bin in 0..hist.bins() {
        folded.fill_weighted(hist.bin_center(bin), hist.content(bin));
    }
    folded.fill_weighted(hist.hi() + 0.5 * width, hist.overflow());
    folded.fill_weighted(hist.lo() - 1.0, hist.underflow());
    folded.set_entries(hist.entries());
    folded
}

/// Unit-area copy, counting under/overflow mass in the denominator. A
/// histogram with nothing in it is returned unchanged.
pub fn normalized(hist: &Hist1) -> Hist1 {
    let integral = hist.integral_with_flows();
    let mut scaled = hist.clone();
    if integral > 0.0 {
        scaled.scale(1.0 / integral);
    }
    scaled
}

/// Normalized, overflow-folded overlay of one histogram across the two
/// pileup conditions, optionally rebinned first.
pub fn shape_comparison(
    baseline: &HistogramSet,
    pileup: &HistogramSet,
    name: &str,
    rebin: usize,
) -> AnalysisResult<ShapeComparison> {
    let prepare = |set: &HistogramSet| -> AnalysisResult<Hist1> {
        let hist = set.hist1(name)?;
        let hist = if rebin > 1 {
            hist.rebinned(rebin)?
        } else {
            hist.clone()
        };
        Ok(fold_overflow(&normalized(&hist)))
    };

    Ok(ShapeComparison {
        name: name.to_string(),
        baseline: prepare(baseline)?,
        pileup: prepare(pileup)?,
    })
}

/// The per-momentum-bin residual histograms of one category, labeled with
/// the pt ranges recorded in the set.
pub fn resolution_overlay(
    set: &HistogramSet,
    category: MuonCategory,
) -> AnalysisResult<ResolutionOverlay> {
    let hists = set.category(category);
    let edges = &set.pt_bin_edges;
    if edges.len() != hists.res.len() + 1 {
        return Err(AnalysisError::ShapeMismatch(format!(
            "{} residual histograms but {} momentum-bin edges",
            hists.res.len(),
            edges.len()
        )));
    }

    let slices = hists
        .res
        .iter()
        .enumerate()
        .map(|(bin, hist)| ResolutionSlice {
            label: format!("{} < pt < {} GeV", edges[bin], edges[bin + 1]),
            hist: hist.clone(),
        })
        .collect();

    Ok(ResolutionOverlay {
        category,
        slices,
    })
}

#[cfg(test)]
mod tests {
    use super::{fold_overflow, normalized, resolution_overlay, shape_comparison};
    use crate::common::constants::DEFAULT_PT_BIN_EDGES;
    use crate::domain::MuonCategory;
    use crate::modules::histogram::{Hist1, HistogramSet};

    #[test]
    fn folding_moves_the_overflow_into_a_visible_bin() {
        let mut hist = Hist1::new("StaMuons_dR", 100, 0.0, 4.0);
        hist.fill(0.02);
        hist.fill(999.0);
        hist.fill(999.0);
        hist.fill(-1.0);

        let folded = fold_overflow(&hist);
        assert_eq!(folded.bins(), 101);
        assert!((folded.hi() - 4.04).abs() < 1.0e-12);
        assert_eq!(folded.content(0), 1.0);
        assert_eq!(folded.content(100), 2.0);
        assert_eq!(folded.overflow(), 0.0);
        assert_eq!(folded.underflow(), 1.0);
        // The fill count survives the bin-by-bin rebuild.
        assert_eq!(folded.entries(), hist.entries());
        assert_eq!(folded.entries(), 4);
        // No mass is dropped.
        assert!(
            (folded.integral_with_flows() - hist.integral_with_flows()).abs() < 1.0e-12
        );
    }

    #[test]
    fn normalization_includes_flow_mass_in_the_denominator() {
        let mut hist = Hist1::new("GenMuons_vr", 750, 0.0, 750.0);
        hist.fill(1.0);
        hist.fill(800.0);

        let unit = normalized(&hist);
        assert!((unit.integral_with_flows() - 1.0).abs() < 1.0e-12);
        assert!((unit.content(1) - 0.5).abs() < 1.0e-12);

        let empty = normalized(&Hist1::new("GenMuons_vr", 10, 0.0, 10.0));
        assert_eq!(empty.integral_with_flows(), 0.0);
    }

    #[test]
    fn comparison_prepares_both_conditions_identically() {
        let mut baseline = HistogramSet::new(&DEFAULT_PT_BIN_EDGES);
        let mut pileup = HistogramSet::new(&DEFAULT_PT_BIN_EDGES);
        baseline.sta.delta_r.fill(0.02);
        baseline.sta.delta_r.fill(999.0);
        for _ in 0..4 {
            pileup.sta.delta_r.fill(999.0);
        }

        let comparison = shape_comparison(&baseline, &pileup, "StaMuons_dR", 2)
            .expect("comparison should build");
        assert_eq!(comparison.name, "StaMuons_dR");
        assert_eq!(comparison.baseline.bins(), 51);
        assert!((comparison.baseline.content(0) - 0.5).abs() < 1.0e-12);
        assert!((comparison.baseline.content(50) - 0.5).abs() < 1.0e-12);
        assert!((comparison.pileup.content(50) - 1.0).abs() < 1.0e-12);
        assert!(shape_comparison(&baseline, &pileup, "NoSuch_hist", 1).is_err());
    }

    #[test]
    fn resolution_slices_carry_momentum_range_labels() {
        let mut set = HistogramSet::new(&DEFAULT_PT_BIN_EDGES);
        set.glb.res[2].fill(0.1);

        let overlay =
            resolution_overlay(&set, MuonCategory::Glb).expect("overlay should build");
        assert_eq!(overlay.slices.len(), 3);
        assert_eq!(overlay.slices[0].label, "10 < pt < 20 GeV");
        assert_eq!(overlay.slices[2].label, "35 < pt < 50 GeV");
        assert_eq!(overlay.slices[2].hist.entries(), 1);
    }
}
