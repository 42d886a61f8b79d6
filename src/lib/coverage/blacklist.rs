//! Blacklist BED loading.

use crate::core::error::{BinCovError, Result};
use bio::io::bed;
use rust_lapper::{Interval, Lapper};
use rustc_hash::FxHashMap;
use std::io::Read;
use std::path::Path;

/// Load blacklist regions from a BED file into per-contig interval sets.
///
/// The map is keyed by contig name, so whole-genome blacklists work against
/// alignment files that only carry a subset of contigs: regions on unknown
/// contigs are simply never queried. Overlapping regions are not merged;
/// each region is tested on its own against a bin.
pub fn load_blacklist<P: AsRef<Path>>(path: P) -> Result<FxHashMap<String, Lapper<u32, ()>>> {
    let path = path.as_ref();
    let reader = bed::Reader::from_file(path)
        .map_err(|err| BinCovError::Parse(format!("blacklist {}: {}", path.display(), err)))?;
    read_blacklist(reader)
}

fn read_blacklist<R: Read>(mut reader: bed::Reader<R>) -> Result<FxHashMap<String, Lapper<u32, ()>>> {
    let mut regions: FxHashMap<String, Vec<Interval<u32, ()>>> = FxHashMap::default();

    for (i, record) in reader.records().enumerate() {
        let record =
            record.map_err(|err| BinCovError::Parse(format!("blacklist record {}: {}", i, err)))?;
        let start = narrow(record.start(), record.chrom(), i)?;
        let end = narrow(record.end(), record.chrom(), i)?;
        if end <= start {
            return Err(BinCovError::InvalidInterval {
                contig: record.chrom().to_string(),
                start,
                end,
            });
        }
        regions
            .entry(record.chrom().to_string())
            .or_default()
            .push(Interval {
                start,
                stop: end,
                val: (),
            });
    }

    Ok(regions
        .into_iter()
        .map(|(contig, intervals)| (contig, Lapper::new(intervals)))
        .collect())
}

fn narrow(coord: u64, contig: &str, record_index: usize) -> Result<u32> {
    u32::try_from(coord).map_err(|_| {
        BinCovError::Parse(format!(
            "blacklist record {} on {}: coordinate {} does not fit a 32-bit position",
            record_index, contig, coord
        ))
    })
}
