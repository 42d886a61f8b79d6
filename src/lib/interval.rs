//! Half-open genomic intervals and the overlap algebra the binning pipeline
//! is built on.
//!
//! Every stage of the pipeline trades in [`GenomicInterval`]: read and
//! fragment mappings, candidate bins, and blacklist regions are all the same
//! shape. An interval is `[start, end)` on a named contig and is immutable
//! once constructed; transformations always produce new collections.

use crate::core::error::{BinCovError, Result};
use smartstring::{LazyCompact, SmartString};
use std::fmt;

/// A half-open interval `[start, end)` on a reference contig.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomicInterval {
    /// Reference sequence name, matching the alignment source's naming.
    pub contig: SmartString<LazyCompact>,
    /// 0-based inclusive start.
    pub start: u32,
    /// 0-based exclusive end.
    pub end: u32,
}

impl GenomicInterval {
    /// Construct an interval, rejecting `end <= start`.
    pub fn new(contig: &str, start: u32, end: u32) -> Result<Self> {
        if end <= start {
            return Err(BinCovError::InvalidInterval {
                contig: contig.to_string(),
                start,
                end,
            });
        }
        Ok(Self {
            contig: SmartString::from(contig),
            start,
            end,
        })
    }

    /// Interval width in bases. Always positive.
    #[inline]
    pub fn length(&self) -> u32 {
        self.end - self.start
    }

    /// Number of bases shared with the half-open range `[start, end)`,
    /// assuming the range lies on the same contig.
    #[inline]
    pub fn overlap(&self, start: u32, end: u32) -> u32 {
        let lo = self.start.max(start);
        let hi = self.end.min(end);
        hi.saturating_sub(lo)
    }

    /// Fraction of `self` covered by `other`.
    ///
    /// Asymmetric: the overlap length is divided by the length of `self`,
    /// never `other`. Returns 0.0 when the contigs differ or the intervals
    /// do not intersect.
    pub fn overlap_fraction(&self, other: &GenomicInterval) -> f64 {
        if self.contig != other.contig {
            return 0.0;
        }
        f64::from(self.overlap(other.start, other.end)) / f64::from(self.length())
    }

    /// `true` when `other` lies entirely within `self` on the same contig.
    pub fn contains(&self, other: &GenomicInterval) -> bool {
        self.contig == other.contig && self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(contig: &str, start: u32, end: u32) -> GenomicInterval {
        GenomicInterval::new(contig, start, end).unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted_intervals() {
        assert!(matches!(
            GenomicInterval::new("chr1", 100, 100),
            Err(BinCovError::InvalidInterval { start: 100, end: 100, .. })
        ));
        assert!(GenomicInterval::new("chr1", 200, 100).is_err());
    }

    #[test]
    fn length_is_end_minus_start() {
        assert_eq!(iv("chr1", 500, 600).length(), 100);
    }

    #[test]
    fn overlap_fraction_is_asymmetric() {
        let bin = iv("chr1", 0, 1000);
        let region = iv("chr1", 500, 600);
        assert!((bin.overlap_fraction(&region) - 0.10).abs() < f64::EPSILON);
        assert!((region.overlap_fraction(&bin) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overlap_fraction_zero_across_contigs() {
        let a = iv("chr1", 0, 1000);
        let b = iv("chr2", 0, 1000);
        assert_eq!(a.overlap_fraction(&b), 0.0);
    }

    #[test]
    fn overlap_fraction_zero_when_disjoint() {
        let a = iv("chr1", 0, 1000);
        let b = iv("chr1", 1000, 2000);
        assert_eq!(a.overlap_fraction(&b), 0.0);
    }

    #[test]
    fn containment() {
        let outer = iv("chr1", 0, 1000);
        let inner = iv("chr1", 250, 750);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&iv("chr2", 250, 750)));
        assert!(!outer.contains(&iv("chr1", 900, 1100)));
    }

    #[test]
    fn display_is_region_notation() {
        assert_eq!(iv("chr1", 0, 1000).to_string(), "chr1:0-1000");
    }
}
