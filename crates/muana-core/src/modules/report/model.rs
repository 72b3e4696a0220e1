use crate::domain::MuonCategory;
use crate::modules::histogram::Hist1;
use serde::{Deserialize, Serialize};

/// One ratio-graph point: bin center, efficiency, asymmetric errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    pub x: f64,
    pub value: f64,
    pub error_low: f64,
    pub error_high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioGraph {
    pub name: String,
    pub points: Vec<GraphPoint>,
}

/// One momentum slice of a category's residual distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionSlice {
    pub label: String,
    pub hist: Hist1,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOverlay {
    pub category: MuonCategory,
    pub slices: Vec<ResolutionSlice>,
}

/// Normalized, overflow-folded shapes of the same histogram under the two
/// pileup conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeComparison {
    pub name: String,
    pub baseline: Hist1,
    pub pileup: Hist1,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub efficiencies: Vec<RatioGraph>,
    pub fake_rates: Vec<RatioGraph>,
    pub skipped_fake_numerators: Vec<String>,
    pub resolutions: Vec<ResolutionOverlay>,
    pub comparisons: Vec<ShapeComparison>,
}
