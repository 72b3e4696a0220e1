//! The full named histogram schema of one analysis run.
//!
//! The set is created at run start, mutated per event by the matcher, and
//! written once at run end; the reporting stage binds to the names below
//! literally, so they are stable.

use super::model::{Hist1, Hist2};
use crate::domain::{AnalysisError, AnalysisResult, MuonCategory};
use crate::modules::serialization::{read_json_artifact, write_json_artifact};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-category accumulators: match distance, matched pt, matched vr and
/// one residual histogram per momentum bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryHists {
    pub delta_r: Hist1,
    pub pt: Hist1,
    pub vr: Hist1,
    pub res: Vec<Hist1>,
}

impl CategoryHists {
    fn new(category: MuonCategory, pt_bin_count: usize) -> Self {
        let prefix = category.prefix();
        Self {
            delta_r: Hist1::new(format!("{prefix}Muons_dR"), 100, 0.0, 4.0),
            pt: Hist1::new(format!("{prefix}Muons_pt"), 100, 0.0, 100.0),
            vr: Hist1::new(format!("{prefix}Muons_vr"), 750, 0.0, 750.0),
            res: (0..pt_bin_count)
                .map(|bin| Hist1::new(format!("{prefix}Muons_res_{bin}"), 60, -3.0, 3.0))
                .collect(),
        }
    }

    fn merge(&mut self, other: &Self) -> AnalysisResult<()> {
        self.delta_r.merge(&other.delta_r)?;
        self.pt.merge(&other.pt)?;
        self.vr.merge(&other.vr)?;
        if self.res.len() != other.res.len() {
            return Err(AnalysisError::ShapeMismatch(format!(
                "residual bin counts differ: {} vs {}",
                self.res.len(),
                other.res.len()
            )));
        }
        for (target, source) in self.res.iter_mut().zip(&other.res) {
            target.merge(source)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSet {
    /// Momentum-bin edges the residual histograms were booked with; kept in
    /// the persisted file so the reporting stage can label the slices.
    pub pt_bin_edges: Vec<f64>,

    pub gen_eta: Hist1,
    pub gen_pt: Hist1,
    pub gen_vx: Hist1,
    pub gen_vy: Hist1,
    pub gen_vz: Hist1,
    pub gen_vr: Hist1,

    pub sta: CategoryHists,
    pub trk: CategoryHists,
    pub glb: CategoryHists,
    pub glb_sta: CategoryHists,

    pub gen_sta_eta: Hist2,
    pub gen_sta_phi: Hist2,
}

impl HistogramSet {
    pub fn new(pt_bin_edges: &[f64]) -> Self {
        let pt_bin_count = pt_bin_edges.len().saturating_sub(1);
        Self {
            pt_bin_edges: pt_bin_edges.to_vec(),
            gen_eta: Hist1::new("GenMuons_eta", 100, -2.5, 2.5),
            gen_pt: Hist1::new("GenMuons_pt", 100, 0.0, 100.0),
            gen_vx: Hist1::new("GenMuons_vx", 150, 0.0, 750.0),
            gen_vy: Hist1::new("GenMuons_vy", 150, 0.0, 750.0),
            gen_vz: Hist1::new("GenMuons_vz", 150, 0.0, 750.0),
            gen_vr: Hist1::new("GenMuons_vr", 750, 0.0, 750.0),
            sta: CategoryHists::new(MuonCategory::Sta, pt_bin_count),
            trk: CategoryHists::new(MuonCategory::Trk, pt_bin_count),
            glb: CategoryHists::new(MuonCategory::Glb, pt_bin_count),
            glb_sta: CategoryHists::new(MuonCategory::GlbSta, pt_bin_count),
            gen_sta_eta: Hist2::new("GenStaMuons_eta", 50, -2.5, 2.5, 50, -2.5, 2.5),
            gen_sta_phi: Hist2::new("GenStaMuons_phi", 50, -3.2, 3.2, 50, -3.2, 3.2),
        }
    }

    pub fn category(&self, category: MuonCategory) -> &CategoryHists {
        match category {
            MuonCategory::Sta => &self.sta,
            MuonCategory::Trk => &self.trk,
            MuonCategory::Glb => &self.glb,
            MuonCategory::GlbSta => &self.glb_sta,
        }
    }

    pub fn category_mut(&mut self, category: MuonCategory) -> &mut CategoryHists {
        match category {
            MuonCategory::Sta => &mut self.sta,
            MuonCategory::Trk => &mut self.trk,
            MuonCategory::Glb => &mut self.glb,
            MuonCategory::GlbSta => &mut self.glb_sta,
        }
    }

    fn hist1_members(&self) -> impl Iterator<Item = &Hist1> {
        let gen_members = [
            &self.gen_eta,
            &self.gen_pt,
            &self.gen_vx,
            &self.gen_vy,
            &self.gen_vz,
            &self.gen_vr,
        ];
        let category_members = MuonCategory::ALL.iter().flat_map(|category| {
            let hists = self.category(*category);
            [&hists.delta_r, &hists.pt, &hists.vr]
                .into_iter()
                .chain(hists.res.iter())
        });
        gen_members.into_iter().chain(category_members)
    }

    /// Name-keyed lookup across every 1-D member of the schema.
    pub fn hist1(&self, name: &str) -> AnalysisResult<&Hist1> {
        self.hist1_members()
            .find(|hist| hist.name() == name)
            .ok_or_else(|| AnalysisError::UnknownHistogram(name.to_string()))
    }

    pub fn merge(&mut self, other: &Self) -> AnalysisResult<()> {
        if self.pt_bin_edges != other.pt_bin_edges {
            return Err(AnalysisError::ShapeMismatch(
                "momentum-bin edges differ between sets".to_string(),
            ));
        }
        self.gen_eta.merge(&other.gen_eta)?;
        self.gen_pt.merge(&other.gen_pt)?;
        self.gen_vx.merge(&other.gen_vx)?;
        self.gen_vy.merge(&other.gen_vy)?;
        self.gen_vz.merge(&other.gen_vz)?;
        self.gen_vr.merge(&other.gen_vr)?;
        self.sta.merge(&other.sta)?;
        self.trk.merge(&other.trk)?;
        self.glb.merge(&other.glb)?;
        self.glb_sta.merge(&other.glb_sta)?;
        self.gen_sta_eta.merge(&other.gen_sta_eta)?;
        self.gen_sta_phi.merge(&other.gen_sta_phi)?;
        Ok(())
    }

    pub fn write_to_file(&self, path: &Path) -> AnalysisResult<()> {
        write_json_artifact(path, self)
    }

    pub fn read_from_file(path: &Path) -> AnalysisResult<Self> {
        read_json_artifact(path)
    }
}
