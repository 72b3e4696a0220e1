//! Truth-to-reconstruction matching and histogram filling.
//!
//! Per event: every truth muon passing the selection chain is matched
//! independently against all four reconstruction categories; each category
//! keeps its own running minimum over the same candidate collection. A muon
//! whose production radius exceeds the configured maximum contributes to no
//! histogram at all.

mod model;

pub use model::{CategoryMatch, best_match, passes_truth_selection};

use crate::common::AnalysisConfig;
use crate::common::constants::NO_MATCH_DELTA_R;
use crate::domain::{AnalysisResult, MuonCategory};
use crate::modules::event::{EventRecord, TruthParticle};
use crate::modules::histogram::{CategoryHists, HistogramSet};

/// Counters reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub events: u64,
    pub truth_muons_filled: u64,
}

/// Processes one event into the accumulator set. Returns the number of
/// truth muons that survived the full selection (including the radius cut)
/// and were folded into the histograms.
pub fn analyze_event(event: &EventRecord, config: &AnalysisConfig, set: &mut HistogramSet) -> u64 {
    let mut filled = 0;

    for truth in &event.truth_particles {
        if !passes_truth_selection(truth, config.min_pt()) {
            continue;
        }

        let vr = truth.production_radius();
        if vr > config.max_vr {
            continue;
        }

        set.gen_eta.fill(truth.eta);
        set.gen_pt.fill(truth.pt);
        set.gen_vx.fill(truth.vx.abs());
        set.gen_vy.fill(truth.vy.abs());
        set.gen_vz.fill(truth.vz.abs());
        set.gen_vr.fill(vr);

        for category in MuonCategory::ALL {
            let matched = best_match(truth, &event.candidates, category, config.min_pt());
            fill_category(set.category_mut(category), matched.as_ref(), truth, vr, config);

            if category == MuonCategory::Sta {
                if let Some(matched) = &matched {
                    if matched.delta_r < config.max_delta_r {
                        set.gen_sta_eta.fill(truth.eta, matched.eta);
                        set.gen_sta_phi.fill(truth.phi, matched.phi);
                    }
                }
            }
        }

        filled += 1;
    }

    filled
}

/// Acceptance and fill policy for one category. The distance histogram is
/// always filled (the sentinel lands in its overflow when no candidate
/// qualified); the conditional histograms only on an accepted match.
fn fill_category(
    hists: &mut CategoryHists,
    matched: Option<&CategoryMatch>,
    truth: &TruthParticle,
    vr: f64,
    config: &AnalysisConfig,
) {
    let Some(matched) = matched else {
        hists.delta_r.fill(NO_MATCH_DELTA_R);
        return;
    };

    hists.delta_r.fill(matched.delta_r);
    if matched.delta_r < config.max_delta_r {
        hists.pt.fill(matched.pt);
        hists.vr.fill(vr);
        if let Some(bin) = config.momentum_bin(truth.pt) {
            hists.res[bin].fill(matched.residual);
        }
    }
}

/// Streams an event source into the set, stopping at the first event error.
pub fn run_analysis<I>(
    events: I,
    config: &AnalysisConfig,
    set: &mut HistogramSet,
) -> AnalysisResult<RunSummary>
where
    I: IntoIterator<Item = AnalysisResult<EventRecord>>,
{
    let mut summary = RunSummary::default();
    for event in events {
        let event = event?;
        summary.truth_muons_filled += analyze_event(&event, config, set);
        summary.events += 1;
    }
    Ok(summary)
}
