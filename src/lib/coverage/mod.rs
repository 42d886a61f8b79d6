//! Single-contig binned coverage pipeline.
//!
//! One invocation of [`contig_coverage`] runs the whole pipeline for one
//! contig of an indexed alignment file: partition the contig into
//! fixed-width bins, drop bins a blacklist region covers past the overlap
//! threshold, stream the contig's alignments through the read filter, and
//! count the surviving intervals per retained bin. The result is a
//! coordinate-ordered [`CoverageRecord`] sequence; [`normalize()`] optionally
//! rescales it by the median of the non-zero bins.
//!
//! Everything is single-threaded and single-pass. Callers wanting
//! contig-level parallelism run independent invocations per contig, since
//! bins, intervals, and blacklist regions on one contig never interact with
//! another's.

pub mod bins;
pub mod blacklist;
pub mod counter;
pub mod normalize;
pub mod read_filter;

use crate::core::error::{BinCovError, Result};
use crate::record::CoverageRecord;
use lazy_static::lazy_static;
use log::debug;
use rust_htslib::bam::{self, Read};
use rust_lapper::Lapper;

pub use normalize::normalize;
pub use read_filter::CoverageMode;

/// Default bin width in bp.
pub const DEFAULT_BINSIZE: u32 = 1_000;

/// Default maximum tolerated blacklist overlap fraction.
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.05;

lazy_static! {
    /// DEFAULT_BINSIZE as a str, for CLI default values.
    pub static ref DEFAULT_BINSIZE_STR: String = DEFAULT_BINSIZE.to_string();

    /// DEFAULT_OVERLAP_THRESHOLD as a str, for CLI default values.
    pub static ref DEFAULT_OVERLAP_THRESHOLD_STR: String = DEFAULT_OVERLAP_THRESHOLD.to_string();
}

/// Knobs for one coverage invocation.
#[derive(Debug, Clone)]
pub struct CoverageConfig {
    pub mode: CoverageMode,
    pub binsize: u32,
    pub overlap_threshold: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            mode: CoverageMode::Nucleotide,
            binsize: DEFAULT_BINSIZE,
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }
}

impl CoverageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.binsize == 0 {
            return Err(BinCovError::Config(
                "binsize must be a positive number of bases".to_string(),
            ));
        }
        if !(self.overlap_threshold > 0.0 && self.overlap_threshold <= 1.0) {
            return Err(BinCovError::ThresholdValidation {
                field: "overlap threshold".to_string(),
                min: 0.0,
                max: 1.0,
                value: self.overlap_threshold,
            });
        }
        Ok(())
    }
}

/// Compute raw binned coverage for one contig of an indexed alignment file.
///
/// The reader must be positioned on a coordinate-sorted BAM/CRAM; the contig
/// is fetched here. `blacklist` is the contig's own region set, if any.
pub fn contig_coverage(
    reader: &mut bam::IndexedReader,
    contig: &str,
    blacklist: Option<&Lapper<u32, ()>>,
    config: &CoverageConfig,
) -> Result<Vec<CoverageRecord>> {
    config.validate()?;

    let header = reader.header().to_owned();
    let tid = header
        .tid(contig.as_bytes())
        .ok_or_else(|| BinCovError::MissingContig(contig.to_string()))?;
    let contig_len = header
        .target_len(tid)
        .ok_or_else(|| BinCovError::MissingContig(contig.to_string()))?;
    let contig_len = u32::try_from(contig_len).map_err(|_| {
        BinCovError::Parse(format!(
            "contig {} length {} does not fit a 32-bit position",
            contig, contig_len
        ))
    })?;

    let candidates = bins::generate_bins(contig, contig_len, config.binsize)?;
    let retained = match blacklist {
        Some(regions) => {
            bins::exclude_blacklisted(candidates, regions, config.overlap_threshold)
        }
        None => candidates,
    };
    debug!(
        "{}: {} bp, {} retained bins of {} bp",
        contig,
        contig_len,
        retained.len(),
        config.binsize
    );

    reader.fetch((tid, 0, contig_len))?;
    let intervals = read_filter::filter_mappings(reader.records(), contig, config.mode);
    counter::count_coverage(&retained, intervals)
}
