pub mod contig;
pub mod genome;

use anyhow::{Context, Result};
use bincov_lib::core::io::{get_writer, is_gzip_path, make_parent_dirs};
use serde::Serialize;
use std::path::Path;

/// Canonical human contigs processed by default in genome mode.
///
/// Chr-prefixed autosomes, sex chromosomes, and mitochondrial DNA, following
/// UCSC naming. `--all-contigs` opts in to decoys, alts, and spike-ins.
pub const STANDARD_CONTIGS: &[&str] = &[
    "chr1", "chr2", "chr3", "chr4", "chr5", "chr6", "chr7", "chr8", "chr9", "chr10", "chr11",
    "chr12", "chr13", "chr14", "chr15", "chr16", "chr17", "chr18", "chr19", "chr20", "chr21",
    "chr22", "chrX", "chrY", "chrM",
];

/// Returns `true` when a contig name matches one of [`STANDARD_CONTIGS`].
#[inline]
pub fn is_standard_contig(name: &str) -> bool {
    STANDARD_CONTIGS
        .iter()
        .any(|contig| contig.eq_ignore_ascii_case(name))
}

/// Serialize coverage records to a tab-delimited file (or stdout for `-`),
/// compressing when the path carries a gzip extension.
pub(crate) fn write_records<T: Serialize, P: AsRef<Path>>(path: P, records: &[T]) -> Result<()> {
    let path = path.as_ref();
    make_parent_dirs(path)?;
    let target = Some(path);
    let mut writer = get_writer(&target, is_gzip_path(path), 1, 6)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}
