//! Hard-coded physics constants and sentinel values of the analysis.

/// Fiducial pseudorapidity cutoff applied to truth muons and to every
/// reconstructed track considered for matching.
pub const ETA_FIDUCIAL: f64 = 2.4;

/// PDG particle code of the muon; truth particles are selected on |pdg_id|.
pub const MUON_PDG_ID: i32 = 13;

/// Distance recorded in the dR histograms when a category has no match.
/// Larger than any attainable dR and than any acceptance threshold, so the
/// entry lands in the overflow bin.
pub const NO_MATCH_DELTA_R: f64 = 999.0;

pub const DEFAULT_MAX_DELTA_R: f64 = 0.3;
pub const DEFAULT_MAX_VR: f64 = 500.0;
pub const DEFAULT_PT_BIN_EDGES: [f64; 4] = [10.0, 20.0, 35.0, 50.0];

/// Confidence level of the asymmetric binomial intervals on ratio graphs.
pub const EFFICIENCY_CONFIDENCE_LEVEL: f64 = 0.6827;
