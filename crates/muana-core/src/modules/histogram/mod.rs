mod model;
mod store;

pub use model::{Hist1, Hist2};
pub use store::{CategoryHists, HistogramSet};
