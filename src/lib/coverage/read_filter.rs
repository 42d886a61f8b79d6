//! Alignment-record filtering and interval extraction.
//!
//! Coverage only counts primary, mapped, non-duplicate alignments. In
//! nucleotide mode every eligible record contributes its own aligned span;
//! in physical mode only read1 of a proper pair contributes, and the
//! emitted interval is the span between the two outermost pair starts, so
//! each fragment is counted exactly once without any cross-record
//! bookkeeping.

use crate::core::error::{BinCovError, Result};
use crate::interval::GenomicInterval;
use rust_htslib::bam::ext::BamRecordExtensions;
use rust_htslib::bam::record::Record;
use std::fmt;
use std::str::FromStr;

/// How alignments are converted into coverage intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageMode {
    /// One interval per eligible read: `[reference_start, reference_end)`.
    Nucleotide,
    /// One interval per proper pair: the span between the pair's starts.
    Physical,
}

impl CoverageMode {
    /// Accepted spellings, in CLI order.
    pub const OPTIONS: &'static [&'static str] = &["nucleotide", "physical"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageMode::Nucleotide => "nucleotide",
            CoverageMode::Physical => "physical",
        }
    }
}

impl FromStr for CoverageMode {
    type Err = BinCovError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "nucleotide" => Ok(CoverageMode::Nucleotide),
            "physical" => Ok(CoverageMode::Physical),
            other => Err(BinCovError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for CoverageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `true` for primary, mapped, non-duplicate alignments. Nothing else ever
/// counts toward coverage, in either mode.
#[inline]
pub fn is_countable(record: &Record) -> bool {
    !(record.is_duplicate()
        || record.is_unmapped()
        || record.is_secondary()
        || record.is_supplementary())
}

/// `true` when a record should emit a physical fragment: countable, read1 of
/// a proper pair, mate mapped. The read1 guard keeps each pair to a single
/// emitted interval.
#[inline]
pub fn emits_fragment(record: &Record) -> bool {
    is_countable(record)
        && record.is_proper_pair()
        && record.is_first_in_template()
        && !record.is_mate_unmapped()
}

fn coord(contig: &str, pos: i64) -> Result<u32> {
    u32::try_from(pos).map_err(|_| {
        BinCovError::Parse(format!(
            "coordinate {} on {} does not fit a 32-bit position",
            pos, contig
        ))
    })
}

/// The aligned span of a single read.
fn read_interval(contig: &str, record: &Record) -> Result<GenomicInterval> {
    let start = coord(contig, record.pos())?;
    let end = coord(contig, record.reference_end())?;
    GenomicInterval::new(contig, start, end)
}

/// The span between the starts of a read and its mate. A pair whose reads
/// start at the same coordinate yields an empty span and is surfaced as
/// `InvalidInterval` rather than silently dropped.
fn fragment_interval(contig: &str, record: &Record) -> Result<GenomicInterval> {
    let read_start = coord(contig, record.pos())?;
    let mate_start = coord(contig, record.mpos())?;
    GenomicInterval::new(
        contig,
        read_start.min(mate_start),
        read_start.max(mate_start),
    )
}

/// Map one contig's alignment records to the intervals that count toward
/// coverage.
///
/// Lazy and single-pass: records are pulled one at a time and ineligible
/// ones are skipped without allocation. The caller is responsible for
/// restricting `records` to the named contig.
pub fn filter_mappings<'a, I>(
    records: I,
    contig: &'a str,
    mode: CoverageMode,
) -> impl Iterator<Item = Result<GenomicInterval>> + 'a
where
    I: Iterator<Item = rust_htslib::errors::Result<Record>> + 'a,
{
    records.filter_map(move |record| {
        let record = match record {
            Ok(record) => record,
            Err(err) => return Some(Err(BinCovError::Bam(err))),
        };
        match mode {
            CoverageMode::Nucleotide if is_countable(&record) => {
                Some(read_interval(contig, &record))
            }
            CoverageMode::Physical if emits_fragment(&record) => {
                Some(fragment_interval(contig, &record))
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_htslib::bam::HeaderView;

    fn test_header() -> HeaderView {
        HeaderView::from_bytes(b"@SQ\tSN:chr1\tLN:1000000\n")
    }

    fn sam_record(line: &str) -> Record {
        Record::from_sam(&test_header(), line.as_bytes()).expect("valid SAM line")
    }

    fn run_filter(lines: &[&str], mode: CoverageMode) -> Vec<Result<GenomicInterval>> {
        let records = lines.iter().map(|line| Ok(sam_record(line)));
        filter_mappings(records, "chr1", mode).collect()
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(
            "nucleotide".parse::<CoverageMode>().unwrap(),
            CoverageMode::Nucleotide
        );
        assert_eq!(
            "physical".parse::<CoverageMode>().unwrap(),
            CoverageMode::Physical
        );
        assert!(matches!(
            "base".parse::<CoverageMode>(),
            Err(BinCovError::InvalidMode(mode)) if mode == "base"
        ));
    }

    #[test]
    fn nucleotide_emits_aligned_span() {
        let intervals = run_filter(
            &["r1\t0\tchr1\t101\t60\t50M\t*\t0\t0\t*\t*"],
            CoverageMode::Nucleotide,
        );
        assert_eq!(intervals.len(), 1);
        assert_eq!(
            *intervals[0].as_ref().unwrap(),
            GenomicInterval::new("chr1", 100, 150).unwrap()
        );
    }

    #[test]
    fn nucleotide_skips_filtered_flags() {
        // duplicate, unmapped, secondary, supplementary
        let intervals = run_filter(
            &[
                "d1\t1024\tchr1\t101\t60\t50M\t*\t0\t0\t*\t*",
                "u1\t4\t*\t0\t0\t*\t*\t0\t0\t*\t*",
                "s1\t256\tchr1\t101\t60\t50M\t*\t0\t0\t*\t*",
                "s2\t2048\tchr1\t101\t60\t50M\t*\t0\t0\t*\t*",
            ],
            CoverageMode::Nucleotide,
        );
        assert!(intervals.is_empty());
    }

    #[test]
    fn physical_emits_one_fragment_per_pair() {
        // flag 99 = paired, proper, mate reverse, read1; flag 147 = the mate
        let intervals = run_filter(
            &[
                "p1\t99\tchr1\t101\t60\t50M\t=\t301\t250\t*\t*",
                "p1\t147\tchr1\t301\t60\t50M\t=\t101\t-250\t*\t*",
            ],
            CoverageMode::Physical,
        );
        assert_eq!(intervals.len(), 1);
        assert_eq!(
            *intervals[0].as_ref().unwrap(),
            GenomicInterval::new("chr1", 100, 300).unwrap()
        );
    }

    #[test]
    fn physical_orients_fragment_when_mate_is_upstream() {
        let intervals = run_filter(
            &["p2\t99\tchr1\t501\t60\t50M\t=\t101\t-450\t*\t*"],
            CoverageMode::Physical,
        );
        assert_eq!(
            *intervals[0].as_ref().unwrap(),
            GenomicInterval::new("chr1", 100, 500).unwrap()
        );
    }

    #[test]
    fn physical_requires_proper_pair_and_mapped_mate() {
        // read1 but not proper (65), proper but mate unmapped (75)
        let intervals = run_filter(
            &[
                "q1\t65\tchr1\t101\t60\t50M\t=\t301\t250\t*\t*",
                "q2\t75\tchr1\t101\t60\t50M\t=\t101\t0\t*\t*",
            ],
            CoverageMode::Physical,
        );
        assert!(intervals.is_empty());
    }

    #[test]
    fn physical_surfaces_empty_fragments() {
        let intervals = run_filter(
            &["z1\t99\tchr1\t101\t60\t50M\t=\t101\t50\t*\t*"],
            CoverageMode::Physical,
        );
        assert_eq!(intervals.len(), 1);
        assert!(matches!(
            intervals[0],
            Err(BinCovError::InvalidInterval { start: 100, end: 100, .. })
        ));
    }
}
