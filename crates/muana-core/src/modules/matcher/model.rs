//! Truth selection and the per-category nearest-neighbor search.

use crate::common::constants::{ETA_FIDUCIAL, MUON_PDG_ID};
use crate::domain::MuonCategory;
use crate::modules::event::{RecoCandidate, TruthParticle};
use crate::numerics::{curvature_residual, delta_r_raw};

/// Outcome of one category's candidate scan for one truth muon. Absence of
/// a match is represented by `Option::None` upstream; the numeric sentinel
/// only exists at the histogram-fill boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryMatch {
    pub delta_r: f64,
    pub pt: f64,
    pub residual: f64,
    /// Matched track direction, kept for the truth-vs-reco 2-D fills.
    pub eta: f64,
    pub phi: f64,
}

/// Truth-muon selection chain: muon PDG code, prompt final state, last
/// copy, fiducial eta, and pt at or above the lowest momentum-bin edge.
/// The production-radius cut is applied separately by the caller since it
/// gates filling, not matching.
pub fn passes_truth_selection(truth: &TruthParticle, min_pt: f64) -> bool {
    truth.pdg_id.abs() == MUON_PDG_ID
        && truth.prompt_final_state
        && truth.last_copy
        && truth.eta.abs() <= ETA_FIDUCIAL
        && truth.pt >= min_pt
}

/// Nearest candidate of `category` to the truth muon, by raw angular
/// distance, among candidates passing the category's fiducial cut. Strict
/// `<` comparison: the first-seen candidate wins ties.
pub fn best_match(
    truth: &TruthParticle,
    candidates: &[RecoCandidate],
    category: MuonCategory,
    min_pt: f64,
) -> Option<CategoryMatch> {
    let mut best: Option<CategoryMatch> = None;

    for candidate in candidates {
        let Some(track) = candidate.track(category) else {
            continue;
        };
        if track.eta.abs() > ETA_FIDUCIAL {
            continue;
        }
        if track.pt < min_pt {
            continue;
        }

        let delta_r = delta_r_raw(track.eta, track.phi, truth.eta, truth.phi);
        if best.as_ref().is_none_or(|current| delta_r < current.delta_r) {
            best = Some(CategoryMatch {
                delta_r,
                pt: track.pt,
                residual: curvature_residual(track.charge, track.pt, truth.charge, truth.pt),
                eta: track.eta,
                phi: track.phi,
            });
        }
    }

    best
}
