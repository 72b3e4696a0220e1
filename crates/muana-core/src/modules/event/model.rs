//! One event's worth of truth and reconstructed objects.
//!
//! All records are ephemeral: constructed when an event line is parsed,
//! dropped at the end of the event. Nothing here is mutated after
//! construction.

use crate::domain::MuonCategory;
use crate::numerics::production_radius;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSpot {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Generator-level particle from the pruned truth collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruthParticle {
    pub pdg_id: i32,
    pub charge: f64,
    pub eta: f64,
    pub phi: f64,
    pub pt: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub prompt_final_state: bool,
    pub last_copy: bool,
}

impl TruthParticle {
    pub fn production_radius(&self) -> f64 {
        production_radius(self.vx, self.vy, self.vz)
    }
}

/// Kinematics of one reconstruction fit of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateTrack {
    pub eta: f64,
    pub phi: f64,
    pub pt: f64,
    pub charge: f64,
}

/// A reconstructed muon candidate. Category membership is the presence of
/// the corresponding fit; the memberships are not mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoCandidate {
    #[serde(default)]
    pub standalone: Option<CandidateTrack>,
    #[serde(default)]
    pub tracker: Option<CandidateTrack>,
    #[serde(default)]
    pub global: Option<CandidateTrack>,
}

impl RecoCandidate {
    /// The track this candidate contributes to a category, if any.
    /// `GlbSta` requires both fits but reports the global kinematics.
    pub fn track(&self, category: MuonCategory) -> Option<CandidateTrack> {
        match category {
            MuonCategory::Sta => self.standalone,
            MuonCategory::Trk => self.tracker,
            MuonCategory::Glb => self.global,
            MuonCategory::GlbSta => {
                if self.standalone.is_some() {
                    self.global
                } else {
                    None
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub beam_spot: Option<BeamSpot>,
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub truth_particles: Vec<TruthParticle>,
    #[serde(default)]
    pub candidates: Vec<RecoCandidate>,
}
