//! bincov: binned nucleotide and physical coverage from coordinate-sorted
//! alignments.
//!
//! The library computes per-bin coverage along one genomic contig, the
//! building block copy-number and structural-variant pipelines aggregate
//! across samples. A contig is partitioned into fixed-width bins, bins
//! falling in blacklisted regions are removed, primary alignments (or the
//! fragments implied by proper pairs) are streamed through a flag filter,
//! and each retained bin is annotated with the number of overlapping
//! intervals, optionally rescaled by the median of the non-zero bins.
//!
//! # Modules
//!
//! - [`interval`]: half-open genomic intervals and overlap algebra
//! - [`coverage`]: the pipeline stages: read filter, bin generation,
//!   blacklist exclusion, counting, and normalization
//! - [`record`]: serializable per-bin output records
//! - [`core`]: errors, output plumbing, and thread-pool helpers

pub mod core;
pub mod coverage;
pub mod interval;
pub mod record;
