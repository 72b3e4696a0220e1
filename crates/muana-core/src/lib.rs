//! Truth-to-reconstruction muon matching and histogram aggregation.
//!
//! The crate consumes simulated collision events, matches generator-level
//! muons to reconstructed candidates per reconstruction category, accumulates
//! the fixed histogram schema, and derives efficiency / fake-rate / shape
//! comparison graphs from persisted histogram sets.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
