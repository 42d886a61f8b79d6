//! Binned coverage for a single contig.

use anyhow::{Context, Result};
use bincov_lib::core::error::BinCovError;
use bincov_lib::coverage::{
    self, blacklist, normalize, CoverageConfig, CoverageMode, DEFAULT_BINSIZE_STR,
    DEFAULT_OVERLAP_THRESHOLD_STR,
};
use log::{info, warn};
use rust_htslib::bam;
use std::path::PathBuf;
use structopt::StructOpt;

/// Compute binned coverage for one contig.
#[derive(Debug, StructOpt)]
#[structopt(author, name = "contig")]
pub struct ContigArgs {
    /// Input coordinate-sorted, indexed BAM/CRAM.
    pub reads: PathBuf,

    /// Contig to evaluate.
    pub contig: String,

    /// Output path for raw binned coverage (`-` for stdout, `.gz` compresses).
    pub cov_out: PathBuf,

    /// Optional output path for median-normalized coverage.
    #[structopt(long, short = "n")]
    pub norm_out: Option<PathBuf>,

    /// Bin size in bp.
    #[structopt(long, short = "b", default_value = DEFAULT_BINSIZE_STR.as_str())]
    pub binsize: u32,

    /// Count nucleotide or physical coverage.
    #[structopt(
        long,
        short = "m",
        default_value = "nucleotide",
        possible_values = CoverageMode::OPTIONS
    )]
    pub mode: CoverageMode,

    /// BED file of regions to ignore.
    #[structopt(long, short = "x")]
    pub blacklist: Option<PathBuf>,

    /// Maximum tolerated blacklist overlap fraction before a bin is excluded.
    #[structopt(long, short = "v", default_value = DEFAULT_OVERLAP_THRESHOLD_STR.as_str())]
    pub overlap: f64,
}

pub fn run(args: ContigArgs) -> Result<()> {
    info!(
        "Computing {} coverage on {} from {}",
        args.mode,
        args.contig,
        args.reads.display()
    );

    let config = CoverageConfig {
        mode: args.mode,
        binsize: args.binsize,
        overlap_threshold: args.overlap,
    };
    config.validate()?;

    let blacklist_map = args
        .blacklist
        .as_deref()
        .map(blacklist::load_blacklist)
        .transpose()?;

    let mut reader = bam::IndexedReader::from_path(&args.reads)
        .with_context(|| format!("Failed to open {}", args.reads.display()))?;

    let records = coverage::contig_coverage(
        &mut reader,
        &args.contig,
        blacklist_map
            .as_ref()
            .and_then(|map| map.get(args.contig.as_str())),
        &config,
    )?;
    info!("{}: {} retained bins", args.contig, records.len());

    super::write_records(&args.cov_out, &records)?;

    if let Some(norm_out) = &args.norm_out {
        match normalize(&args.contig, &records) {
            Ok(normalized) => super::write_records(norm_out, &normalized)?,
            Err(BinCovError::NoCoverage(contig)) => {
                warn!(
                    "No bin on {} has coverage; skipping normalized output",
                    contig
                );
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
