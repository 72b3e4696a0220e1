//! Line-delimited JSON event source.
//!
//! The first line of an event file is a header object naming the collections
//! the file carries; every further non-blank line is one event record. The
//! configured source identifiers are resolved against the header exactly
//! once, when the reader is opened: required collections (truth particles,
//! muon candidates) abort the run when absent, optional ones (beam spot,
//! vertices, packed truth) are tolerated and reported to the caller.

use super::model::EventRecord;
use crate::common::CollectionSources;
use crate::domain::{AnalysisError, AnalysisResult};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const EVENT_FILE_HEADER_KEY: &str = "collections";

#[derive(Debug, Deserialize)]
struct FileHeader {
    collections: Vec<String>,
}

#[derive(Debug)]
pub struct EventReader<R: BufRead> {
    reader: R,
    location: String,
    line_number: usize,
    missing_optional: Vec<String>,
}

impl EventReader<BufReader<File>> {
    pub fn open(path: &Path, sources: &CollectionSources) -> AnalysisResult<Self> {
        let file = File::open(path).map_err(|source| AnalysisError::io(path, source))?;
        Self::from_buf(BufReader::new(file), path.display().to_string(), sources)
    }
}

impl<R: BufRead> EventReader<R> {
    pub fn from_buf(
        mut reader: R,
        location: String,
        sources: &CollectionSources,
    ) -> AnalysisResult<Self> {
        let mut header_line = String::new();
        reader
            .read_line(&mut header_line)
            .map_err(|source| AnalysisError::io(location.clone(), source))?;
        if header_line.trim().is_empty() {
            return Err(AnalysisError::parse(
                format!("{location}:1"),
                "missing collections header",
            ));
        }

        let header: FileHeader = serde_json::from_str(&header_line)
            .map_err(|error| AnalysisError::parse(format!("{location}:1"), error.to_string()))?;
        let missing_optional = check_sources(&header.collections, sources, &location)?;

        Ok(Self {
            reader,
            location,
            line_number: 1,
            missing_optional,
        })
    }

    /// Optional source identifiers the header did not carry; matching
    /// proceeds without them.
    pub fn missing_optional_sources(&self) -> &[String] {
        &self.missing_optional
    }
}

fn check_sources(
    available: &[String],
    sources: &CollectionSources,
    location: &str,
) -> AnalysisResult<Vec<String>> {
    let has = |name: &str| available.iter().any(|entry| entry == name);

    for required in [&sources.pruned, &sources.muons] {
        if !has(required) {
            return Err(AnalysisError::config(format!(
                "event file '{location}' does not carry required collection '{required}'"
            )));
        }
    }

    let missing = [&sources.beam_spot, &sources.vertices, &sources.packed]
        .into_iter()
        .filter(|name| !has(name))
        .cloned()
        .collect();
    Ok(missing)
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = AnalysisResult<EventRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(source) => {
                    return Some(Err(AnalysisError::io(self.location.clone(), source)));
                }
            }
            self.line_number += 1;
            if line.trim().is_empty() {
                continue;
            }

            return Some(serde_json::from_str(&line).map_err(|error| {
                AnalysisError::parse(
                    format!("{}:{}", self.location, self.line_number),
                    error.to_string(),
                )
            }));
        }
    }
}
