//! Run configuration: collection source identifiers and matching cuts.
//!
//! Loaded once at startup from a JSON file; every field has a default so an
//! empty object is a valid configuration.

use super::constants::{DEFAULT_MAX_DELTA_R, DEFAULT_MAX_VR, DEFAULT_PT_BIN_EDGES};
use crate::domain::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Identifiers of the five consumed event collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSources {
    #[serde(default = "default_beam_spot")]
    pub beam_spot: String,
    #[serde(default = "default_muons")]
    pub muons: String,
    #[serde(default = "default_pruned")]
    pub pruned: String,
    #[serde(default = "default_packed")]
    pub packed: String,
    #[serde(default = "default_vertices")]
    pub vertices: String,
}

fn default_beam_spot() -> String {
    "offlineBeamSpot".to_string()
}

fn default_muons() -> String {
    "slimmedMuons".to_string()
}

fn default_pruned() -> String {
    "prunedGenParticles".to_string()
}

fn default_packed() -> String {
    "packedGenParticles".to_string()
}

fn default_vertices() -> String {
    "offlineSlimmedPrimaryVertices".to_string()
}

impl Default for CollectionSources {
    fn default() -> Self {
        Self {
            beam_spot: default_beam_spot(),
            muons: default_muons(),
            pruned: default_pruned(),
            packed: default_packed(),
            vertices: default_vertices(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub sources: CollectionSources,
    #[serde(default = "default_max_delta_r")]
    pub max_delta_r: f64,
    #[serde(default = "default_max_vr")]
    pub max_vr: f64,
    #[serde(default = "default_pt_bin_edges")]
    pub pt_bin_edges: Vec<f64>,
}

fn default_max_delta_r() -> f64 {
    DEFAULT_MAX_DELTA_R
}

fn default_max_vr() -> f64 {
    DEFAULT_MAX_VR
}

fn default_pt_bin_edges() -> Vec<f64> {
    DEFAULT_PT_BIN_EDGES.to_vec()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sources: CollectionSources::default(),
            max_delta_r: default_max_delta_r(),
            max_vr: default_max_vr(),
            pt_bin_edges: default_pt_bin_edges(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_file(path: &Path) -> AnalysisResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| AnalysisError::io(path, source))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|error| AnalysisError::parse(path.display().to_string(), error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if self.pt_bin_edges.len() < 2 {
            return Err(AnalysisError::config(
                "pt_bin_edges needs at least two edges",
            ));
        }
        if self
            .pt_bin_edges
            .windows(2)
            .any(|pair| pair[1] <= pair[0])
        {
            return Err(AnalysisError::config(
                "pt_bin_edges must be strictly increasing",
            ));
        }
        if !(self.max_delta_r > 0.0) {
            return Err(AnalysisError::config("max_delta_r must be positive"));
        }
        if !(self.max_vr > 0.0) {
            return Err(AnalysisError::config("max_vr must be positive"));
        }
        Ok(())
    }

    /// Lowest momentum-bin edge, doubling as the fiducial pt cut.
    pub fn min_pt(&self) -> f64 {
        self.pt_bin_edges[0]
    }

    pub fn pt_bin_count(&self) -> usize {
        self.pt_bin_edges.len() - 1
    }

    /// Momentum-bin membership, strict on both edges: a pt exactly equal to
    /// an edge belongs to neither neighboring bin.
    pub fn momentum_bin(&self, pt: f64) -> Option<usize> {
        self.pt_bin_edges
            .windows(2)
            .position(|pair| pt > pair[0] && pt < pair[1])
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalysisConfig, CollectionSources};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_the_miniaod_collection_names() {
        let sources = CollectionSources::default();
        assert_eq!(sources.beam_spot, "offlineBeamSpot");
        assert_eq!(sources.muons, "slimmedMuons");
        assert_eq!(sources.pruned, "prunedGenParticles");
        assert_eq!(sources.packed, "packedGenParticles");
        assert_eq!(sources.vertices, "offlineSlimmedPrimaryVertices");
    }

    #[test]
    fn momentum_bins_are_strict_exclusive_at_edges() {
        let config = AnalysisConfig::default();
        assert_eq!(config.momentum_bin(15.0), Some(0));
        assert_eq!(config.momentum_bin(25.0), Some(1));
        assert_eq!(config.momentum_bin(40.0), Some(2));
        assert_eq!(config.momentum_bin(20.0), None);
        assert_eq!(config.momentum_bin(10.0), None);
        assert_eq!(config.momentum_bin(50.0), None);
        assert_eq!(config.momentum_bin(62.0), None);
    }

    #[test]
    fn empty_object_loads_with_defaults() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("config.json");
        fs::write(&path, "{}").expect("config should be written");

        let config = AnalysisConfig::from_json_file(&path).expect("defaults should apply");
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.min_pt(), 10.0);
        assert_eq!(config.pt_bin_count(), 3);
    }

    #[test]
    fn unsorted_edges_are_rejected() {
        let config = AnalysisConfig {
            pt_bin_edges: vec![10.0, 35.0, 20.0, 50.0],
            ..AnalysisConfig::default()
        };
        let error = config.validate().expect_err("edges should be rejected");
        assert!(error.to_string().contains("strictly increasing"));
    }

    #[test]
    fn single_edge_is_rejected() {
        let config = AnalysisConfig {
            pt_bin_edges: vec![10.0],
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
