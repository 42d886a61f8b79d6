//! Fixed-width bin generation and blacklist exclusion.

use crate::core::error::{BinCovError, Result};
use crate::interval::GenomicInterval;
use rust_lapper::Lapper;

/// Partition a contig into fixed-width, non-overlapping bins.
///
/// Starts run at `i * binsize` while they stay below `contig_len - binsize`,
/// and the last generated start is then discarded, so neither a partial
/// trailing bin nor a bin beginning in the final `binsize` bases is ever
/// produced. Downstream normalization relies on every bin having the same
/// width, which makes this tail truncation part of the contract rather than
/// an implementation detail. A `binsize >= contig_len` simply yields no
/// bins.
pub fn generate_bins(contig: &str, contig_len: u32, binsize: u32) -> Result<Vec<GenomicInterval>> {
    if binsize == 0 {
        return Err(BinCovError::Config(
            "binsize must be a positive number of bases".to_string(),
        ));
    }

    let limit = contig_len.saturating_sub(binsize);
    let starts: Vec<u32> = (0..limit).step_by(binsize as usize).collect();
    let kept = starts.len().saturating_sub(1);

    starts[..kept]
        .iter()
        .map(|&start| GenomicInterval::new(contig, start, start + binsize))
        .collect()
}

/// Drop every bin that any single blacklist region covers by at least
/// `threshold` of the bin's width.
///
/// Regions are tested independently; fractions from different regions are
/// never summed. Bins that survive come back in their original order.
pub fn exclude_blacklisted(
    bins: Vec<GenomicInterval>,
    blacklist: &Lapper<u32, ()>,
    threshold: f64,
) -> Vec<GenomicInterval> {
    bins.into_iter()
        .filter(|bin| {
            blacklist.find(bin.start, bin.end).all(|region| {
                let fraction =
                    f64::from(bin.overlap(region.start, region.stop)) / f64::from(bin.length());
                fraction < threshold
            })
        })
        .collect()
}
