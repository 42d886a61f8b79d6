//! Serializable per-bin coverage records.
//!
//! Records serialize in field order to headerless tab-delimited rows
//! (`contig`, `start`, `end`, value), the BED4-style layout downstream
//! tooling sorts and merges by coordinate. The pipeline emits them already
//! coordinate-ordered.

use crate::interval::GenomicInterval;
use serde::Serialize;
use smartstring::{LazyCompact, SmartString};

/// Raw coverage of one retained bin: the number of filtered read or fragment
/// intervals overlapping it by at least one base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageRecord {
    pub contig: SmartString<LazyCompact>,
    pub start: u32,
    pub end: u32,
    pub count: u64,
}

impl CoverageRecord {
    pub fn new(bin: &GenomicInterval, count: u64) -> Self {
        Self {
            contig: bin.contig.clone(),
            start: bin.start,
            end: bin.end,
            count,
        }
    }
}

/// Median-scaled coverage of one retained bin.
///
/// Normalization is not idempotent: a second pass would rescale by a new
/// median near 1.0 instead of round-tripping. Keeping this type distinct
/// from [`CoverageRecord`] makes that second pass unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub contig: SmartString<LazyCompact>,
    pub start: u32,
    pub end: u32,
    pub depth: f64,
}
