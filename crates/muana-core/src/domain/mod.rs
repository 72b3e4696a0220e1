pub mod errors;

pub use errors::{AnalysisError, AnalysisErrorCategory, AnalysisResult};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The four reconstruction categories a candidate may belong to.
///
/// Membership is non-exclusive: one candidate can carry a standalone fit, a
/// tracker fit and a global fit at the same time. `GlbSta` selects candidates
/// satisfying both the global and the standalone criteria and is evaluated
/// with the global fit's kinematics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MuonCategory {
    Sta,
    Trk,
    Glb,
    GlbSta,
}

impl MuonCategory {
    pub const ALL: [Self; 4] = [Self::Sta, Self::Trk, Self::Glb, Self::GlbSta];

    /// Histogram-name prefix, stable across the persisted schema.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Sta => "Sta",
            Self::Trk => "Trk",
            Self::Glb => "Glb",
            Self::GlbSta => "GlbSta",
        }
    }
}

impl Display for MuonCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Run condition a histogram file was produced under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileupCondition {
    NoPileup,
    HighPileup,
}

impl PileupCondition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoPileup => "noPU",
            Self::HighPileup => "PU200",
        }
    }
}

impl Display for PileupCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::{MuonCategory, PileupCondition};

    #[test]
    fn category_prefixes_match_persisted_schema() {
        let prefixes: Vec<&str> = MuonCategory::ALL.iter().map(|c| c.prefix()).collect();
        assert_eq!(prefixes, ["Sta", "Trk", "Glb", "GlbSta"]);
        assert_eq!(MuonCategory::GlbSta.to_string(), "GlbSta");
    }

    #[test]
    fn pileup_labels_are_stable() {
        assert_eq!(PileupCondition::NoPileup.label(), "noPU");
        assert_eq!(PileupCondition::HighPileup.to_string(), "PU200");
    }
}
