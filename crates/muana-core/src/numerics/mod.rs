pub mod special;

pub use special::{clopper_pearson_interval, incomplete_beta, inverse_incomplete_beta, ln_gamma};

/// Angular distance between two directions from raw eta/phi differences.
///
/// The phi difference is NOT wrapped into [-pi, pi]; a pair straddling the
/// +-pi boundary yields a dPhi near 2*pi. This reproduces the legacy
/// matching behavior bit for bit and is pinned by tests.
pub fn delta_r_raw(eta_a: f64, phi_a: f64, eta_b: f64, phi_b: f64) -> f64 {
    let d_phi = phi_a - phi_b;
    let d_eta = eta_a - eta_b;
    (d_phi * d_phi + d_eta * d_eta).sqrt()
}

/// Signed relative curvature residual between a reconstructed track and the
/// truth muon: ((q/pt)_reco - (q/pt)_truth) / (q/pt)_truth.
pub fn curvature_residual(reco_charge: f64, reco_pt: f64, truth_charge: f64, truth_pt: f64) -> f64 {
    let truth_curvature = truth_charge / truth_pt;
    ((reco_charge / reco_pt) - truth_curvature) / truth_curvature
}

/// Radial distance of the production vertex from the origin.
pub fn production_radius(vx: f64, vy: f64, vz: f64) -> f64 {
    (vx * vx + vy * vy + vz * vz).sqrt()
}
