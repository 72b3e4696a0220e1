//! Uniform-binning histogram accumulators.
//!
//! Bin convention: a value lands in bin `i` when
//! `lo + i*width <= value < lo + (i+1)*width`; values below `lo` count as
//! underflow, values at or above `hi` as overflow. Contents are weights
//! (always 1.0 in this analysis), entries count fill calls. Merging is a
//! bin-wise sum, so sharded runs can be combined after the fact.

use crate::domain::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hist1 {
    name: String,
    bins: usize,
    lo: f64,
    hi: f64,
    contents: Vec<f64>,
    underflow: f64,
    overflow: f64,
    entries: u64,
}

impl Hist1 {
    pub fn new(name: impl Into<String>, bins: usize, lo: f64, hi: f64) -> Self {
        assert!(bins > 0, "histogram needs at least one bin");
        assert!(hi > lo, "histogram range must be non-empty");
        Self {
            name: name.into(),
            bins,
            lo,
            hi,
            contents: vec![0.0; bins],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn bin_width(&self) -> f64 {
        (self.hi - self.lo) / self.bins as f64
    }

    pub fn bin_low_edge(&self, bin: usize) -> f64 {
        self.lo + bin as f64 * self.bin_width()
    }

    pub fn bin_center(&self, bin: usize) -> f64 {
        self.bin_low_edge(bin) + 0.5 * self.bin_width()
    }

    pub fn content(&self, bin: usize) -> f64 {
        self.contents[bin]
    }

    pub fn underflow(&self) -> f64 {
        self.underflow
    }

    pub fn overflow(&self) -> f64 {
        self.overflow
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Overrides the fill counter, for copies rebuilt bin by bin that must
    /// keep the source's entry count.
    pub(crate) fn set_entries(&mut self, entries: u64) {
        self.entries = entries;
    }

    pub fn fill(&mut self, value: f64) {
        self.fill_weighted(value, 1.0);
    }

    pub fn fill_weighted(&mut self, value: f64, weight: f64) {
        self.entries += 1;
        if value < self.lo {
            self.underflow += weight;
        } else if value >= self.hi {
            self.overflow += weight;
        } else {
            let index = ((value - self.lo) / self.bin_width()) as usize;
            // Guard against float rounding landing exactly on `bins`.
            self.contents[index.min(self.bins - 1)] += weight;
        }
    }

    pub fn integral(&self) -> f64 {
        self.contents.iter().sum()
    }

    pub fn integral_with_flows(&self) -> f64 {
        self.integral() + self.underflow + self.overflow
    }

    pub fn max_content(&self) -> f64 {
        self.contents.iter().copied().fold(0.0, f64::max)
    }

    /// Scales contents and flow counters; entries are left untouched.
    pub fn scale(&mut self, factor: f64) {
        for content in &mut self.contents {
            *content *= factor;
        }
        self.underflow *= factor;
        self.overflow *= factor;
    }

    pub fn merge(&mut self, other: &Self) -> AnalysisResult<()> {
        if self.name != other.name
            || self.bins != other.bins
            || self.lo != other.lo
            || self.hi != other.hi
        {
            return Err(AnalysisError::ShapeMismatch(format!(
                "cannot merge '{}' ({} bins over [{}, {}]) with '{}' ({} bins over [{}, {}])",
                self.name, self.bins, self.lo, self.hi, other.name, other.bins, other.lo, other.hi
            )));
        }
        for (target, source) in self.contents.iter_mut().zip(&other.contents) {
            *target += source;
        }
        self.underflow += other.underflow;
        self.overflow += other.overflow;
        self.entries += other.entries;
        Ok(())
    }

    /// Groups consecutive bins; the bin count must divide evenly.
    pub fn rebinned(&self, factor: usize) -> AnalysisResult<Self> {
        if factor == 0 || self.bins % factor != 0 {
            return Err(AnalysisError::ShapeMismatch(format!(
                "rebin factor {factor} does not divide {} bins of '{}'",
                self.bins, self.name
            )));
        }
        let mut rebinned = Self::new(self.name.clone(), self.bins / factor, self.lo, self.hi);
        for (index, content) in self.contents.iter().enumerate() {
            rebinned.contents[index / factor] += content;
        }
        rebinned.underflow = self.underflow;
        rebinned.overflow = self.overflow;
        rebinned.entries = self.entries;
        Ok(rebinned)
    }
}

/// Two-dimensional counterpart with a single out-of-range counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hist2 {
    name: String,
    x_bins: usize,
    x_lo: f64,
    x_hi: f64,
    y_bins: usize,
    y_lo: f64,
    y_hi: f64,
    contents: Vec<f64>,
    out_of_range: f64,
    entries: u64,
}

impl Hist2 {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        x_bins: usize,
        x_lo: f64,
        x_hi: f64,
        y_bins: usize,
        y_lo: f64,
        y_hi: f64,
    ) -> Self {
        assert!(x_bins > 0 && y_bins > 0, "histogram needs at least one bin");
        assert!(x_hi > x_lo && y_hi > y_lo, "histogram range must be non-empty");
        Self {
            name: name.into(),
            x_bins,
            x_lo,
            x_hi,
            y_bins,
            y_lo,
            y_hi,
            contents: vec![0.0; x_bins * y_bins],
            out_of_range: 0.0,
            entries: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x_bins(&self) -> usize {
        self.x_bins
    }

    pub fn y_bins(&self) -> usize {
        self.y_bins
    }

    pub fn x_lo(&self) -> f64 {
        self.x_lo
    }

    pub fn x_hi(&self) -> f64 {
        self.x_hi
    }

    pub fn y_lo(&self) -> f64 {
        self.y_lo
    }

    pub fn y_hi(&self) -> f64 {
        self.y_hi
    }

    pub fn content(&self, x_bin: usize, y_bin: usize) -> f64 {
        self.contents[y_bin * self.x_bins + x_bin]
    }

    pub fn out_of_range(&self) -> f64 {
        self.out_of_range
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    pub fn max_content(&self) -> f64 {
        self.contents.iter().copied().fold(0.0, f64::max)
    }

    pub fn fill(&mut self, x: f64, y: f64) {
        self.entries += 1;
        let x_width = (self.x_hi - self.x_lo) / self.x_bins as f64;
        let y_width = (self.y_hi - self.y_lo) / self.y_bins as f64;
        if x < self.x_lo || x >= self.x_hi || y < self.y_lo || y >= self.y_hi {
            self.out_of_range += 1.0;
            return;
        }
        let x_bin = (((x - self.x_lo) / x_width) as usize).min(self.x_bins - 1);
        let y_bin = (((y - self.y_lo) / y_width) as usize).min(self.y_bins - 1);
        self.contents[y_bin * self.x_bins + x_bin] += 1.0;
    }

    pub fn merge(&mut self, other: &Self) -> AnalysisResult<()> {
        if self.name != other.name
            || self.x_bins != other.x_bins
            || self.y_bins != other.y_bins
            || self.x_lo != other.x_lo
            || self.x_hi != other.x_hi
            || self.y_lo != other.y_lo
            || self.y_hi != other.y_hi
        {
            return Err(AnalysisError::ShapeMismatch(format!(
                "cannot merge 2-D '{}' with '{}'",
                self.name, other.name
            )));
        }
        for (target, source) in self.contents.iter_mut().zip(&other.contents) {
            *target += source;
        }
        self.out_of_range += other.out_of_range;
        self.entries += other.entries;
        Ok(())
    }
}
