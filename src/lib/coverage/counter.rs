//! Per-bin interval counting.

use crate::core::error::Result;
use crate::interval::GenomicInterval;
use crate::record::CoverageRecord;
use rust_lapper::{Interval, Lapper};

/// Count, for every retained bin, the filtered intervals overlapping it by
/// at least one base.
///
/// The interval stream is drained once into a sorted index (`Lapper::new`)
/// and each bin is then answered with two binary searches over the start and
/// stop orderings, keeping a chromosome-scale pass at
/// O((bins + intervals) log intervals). An interval spanning several bins
/// contributes to each of them. Records come back in bin order, which is
/// coordinate order.
pub fn count_coverage<I>(bins: &[GenomicInterval], intervals: I) -> Result<Vec<CoverageRecord>>
where
    I: Iterator<Item = Result<GenomicInterval>>,
{
    let indexed: Vec<Interval<u32, ()>> = intervals
        .map(|interval| {
            interval.map(|interval| Interval {
                start: interval.start,
                stop: interval.end,
                val: (),
            })
        })
        .collect::<Result<_>>()?;
    let lapper = Lapper::new(indexed);

    Ok(bins
        .iter()
        .map(|bin| CoverageRecord::new(bin, lapper.count(bin.start, bin.end) as u64))
        .collect())
}
