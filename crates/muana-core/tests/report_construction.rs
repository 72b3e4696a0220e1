//! Report assembly over persisted histogram sets: binomial intervals,
//! shape comparisons and the serialized report artifact.

use muana_core::common::constants::DEFAULT_PT_BIN_EDGES;
use muana_core::domain::MuonCategory;
use muana_core::modules::histogram::HistogramSet;
use muana_core::modules::report::{AnalysisReport, ReportOptions, build_report};
use muana_core::modules::serialization::{read_json_artifact, write_json_artifact};
use tempfile::TempDir;

/// 4 truth muons at vr = 1.5, 2 of them standalone-matched.
fn half_efficient_set() -> HistogramSet {
    let mut set = HistogramSet::new(&DEFAULT_PT_BIN_EDGES);
    for _ in 0..4 {
        set.gen_vr.fill(1.5);
        set.gen_pt.fill(25.0);
    }
    for _ in 0..2 {
        set.sta.vr.fill(1.5);
        set.sta.pt.fill(25.0);
        set.sta.delta_r.fill(0.01);
    }
    set.sta.delta_r.fill(999.0);
    set.sta.delta_r.fill(999.0);
    set.glb.res[0].fill(-0.2);
    set.glb.res[2].fill(0.4);
    set
}

#[test]
fn efficiency_points_carry_clopper_pearson_errors() {
    let report = build_report(
        &half_efficient_set(),
        &half_efficient_set(),
        &ReportOptions::default(),
    )
    .expect("report should build");

    let sta_vr = report
        .efficiencies
        .iter()
        .find(|graph| graph.name == "Sta_eff_vr_noPU")
        .expect("graph should exist");
    assert_eq!(sta_vr.points.len(), 1);

    let point = &sta_vr.points[0];
    assert!((point.value - 0.5).abs() < 1.0e-12);
    // Central 68.27% interval for 2 of 4, not the sqrt(p(1-p)/n) spread.
    assert!((point.error_low - 0.3145).abs() < 2.0e-3);
    assert!((point.error_high - 0.3145).abs() < 2.0e-3);
    assert!((point.error_low - 0.3536).abs() > 1.0e-2);
}

#[test]
fn smeared_reconstructed_pt_still_builds_a_report() {
    // Reconstructed pt smears across a bin edge: two truth muons at 24.5
    // and 25.5 GeV both reconstruct into the 25-26 GeV bin, so the
    // numerator bin holds more entries than the truth bin under it.
    let mut set = HistogramSet::new(&DEFAULT_PT_BIN_EDGES);
    for pt in [24.5, 25.5] {
        set.gen_pt.fill(pt);
        set.gen_vr.fill(1.5);
        set.sta.vr.fill(1.5);
        set.sta.delta_r.fill(0.01);
    }
    set.sta.pt.fill(25.2);
    set.sta.pt.fill(25.3);

    let report = build_report(&set, &set, &ReportOptions::default())
        .expect("report should build");

    let sta_pt = report
        .efficiencies
        .iter()
        .find(|graph| graph.name == "Sta_eff_pt_noPU")
        .expect("graph should exist");
    // The over-populated bin clamps to unit efficiency with no upward error.
    let clamped = sta_pt
        .points
        .iter()
        .find(|point| (point.x - 25.5).abs() < 1.0e-9)
        .expect("point should exist");
    assert!((clamped.value - 1.0).abs() < 1.0e-12);
    assert!(clamped.error_high.abs() < 1.0e-12);
    // The depleted neighbour reads as zero, not as a failure.
    let depleted = sta_pt
        .points
        .iter()
        .find(|point| (point.x - 24.5).abs() < 1.0e-9)
        .expect("point should exist");
    assert!(depleted.value.abs() < 1.0e-12);
}

#[test]
fn comparisons_are_unit_area_with_a_folded_overflow_bin() {
    let report = build_report(
        &half_efficient_set(),
        &half_efficient_set(),
        &ReportOptions::default(),
    )
    .expect("report should build");

    let sta_dr = report
        .comparisons
        .iter()
        .find(|comparison| comparison.name == "StaMuons_dR")
        .expect("comparison should exist");

    // 100 bins rebinned by 2, plus the folded overflow bin.
    assert_eq!(sta_dr.baseline.bins(), 51);
    assert!((sta_dr.baseline.integral_with_flows() - 1.0).abs() < 1.0e-12);
    // 2 matches in the first visible bin, 2 sentinels folded into the last.
    assert!((sta_dr.baseline.content(0) - 0.5).abs() < 1.0e-12);
    assert!((sta_dr.baseline.content(50) - 0.5).abs() < 1.0e-12);

    let gen_vr = report
        .comparisons
        .iter()
        .find(|comparison| comparison.name == "GenMuons_vr")
        .expect("comparison should exist");
    assert_eq!(gen_vr.baseline.bins(), 751);
    assert!((gen_vr.baseline.content(1) - 1.0).abs() < 1.0e-12);
}

#[test]
fn resolution_overlays_come_from_the_pileup_run() {
    let baseline = HistogramSet::new(&DEFAULT_PT_BIN_EDGES);
    let pileup = half_efficient_set();
    let report =
        build_report(&baseline, &pileup, &ReportOptions::default()).expect("report should build");

    let glb = report
        .resolutions
        .iter()
        .find(|overlay| overlay.category == MuonCategory::Glb)
        .expect("overlay should exist");
    assert_eq!(glb.slices.len(), 3);
    assert_eq!(glb.slices[0].label, "10 < pt < 20 GeV");
    assert_eq!(glb.slices[0].hist.entries(), 1);
    assert_eq!(glb.slices[1].hist.entries(), 0);
    assert_eq!(glb.slices[2].hist.entries(), 1);
}

#[test]
fn report_round_trips_through_the_json_artifact() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = temp.path().join("report.json");

    let report = build_report(
        &half_efficient_set(),
        &half_efficient_set(),
        &ReportOptions::default(),
    )
    .expect("report should build");
    write_json_artifact(&path, &report).expect("write should succeed");

    let restored: AnalysisReport = read_json_artifact(&path).expect("read should succeed");
    assert_eq!(restored.efficiencies.len(), report.efficiencies.len());
    assert_eq!(restored.comparisons.len(), report.comparisons.len());
    assert_eq!(
        restored.skipped_fake_numerators,
        report.skipped_fake_numerators
    );
}
