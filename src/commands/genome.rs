//! Binned coverage across all selected contigs of an alignment file.
//!
//! Each contig runs the full single-contig pipeline independently; workers
//! share nothing but the read-only blacklist map, so contigs fan out across
//! the global Rayon pool and every contig writes its own pair of output
//! files under the output directory.

use anyhow::{anyhow, Context, Result};
use bincov_lib::core::concurrency::configure_global_thread_pool;
use bincov_lib::core::error::BinCovError;
use bincov_lib::coverage::{
    self, blacklist, normalize, CoverageConfig, CoverageMode, DEFAULT_BINSIZE_STR,
    DEFAULT_OVERLAP_THRESHOLD_STR,
};
use log::{info, warn};
use rayon::prelude::*;
use rust_htslib::bam::{self, Read};
use rustc_hash::FxHashSet;
use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;

use super::is_standard_contig;

/// Compute binned coverage for every selected contig.
#[derive(Debug, StructOpt)]
#[structopt(author, name = "genome")]
pub struct GenomeArgs {
    /// Input coordinate-sorted, indexed BAM/CRAM.
    pub reads: PathBuf,

    /// Sample ID used to name per-contig output files.
    pub sample: String,

    /// Output directory for coverage files.
    pub outdir: PathBuf,

    /// File listing contigs to evaluate, one per line.
    #[structopt(long, short = "L")]
    pub contigs: Option<PathBuf>,

    /// Visit every contig in the alignment header instead of the canonical subset.
    #[structopt(long = "all-contigs", short = "A")]
    pub all_contigs: bool,

    /// Also write median-normalized coverage per contig.
    #[structopt(long, short = "N")]
    pub normalize: bool,

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

    /// Number of worker threads; contigs are processed independently.
    #[structopt(long, short = "t", default_value = "4")]
    pub threads: usize,
}

pub fn run(args: GenomeArgs) -> Result<()> {
    let cpus = configure_global_thread_pool(args.threads)?;
    info!(
        "Running genome {} coverage on {} with {} threads",
        args.mode,
        args.reads.display(),
        cpus
    );

    let config = CoverageConfig {
        mode: args.mode,
        binsize: args.binsize,
        overlap_threshold: args.overlap,
    };
    config.validate()?;

    let contigs = select_contigs(&args)?;
    if contigs.is_empty() {
        warn!("No contigs selected; nothing to do");
        return Ok(());
    }

    let blacklist_map = args
        .blacklist
        .as_deref()
        .map(blacklist::load_blacklist)
        .transpose()?;

    fs::create_dir_all(&args.outdir)
        .with_context(|| format!("Failed to create {}", args.outdir.display()))?;

    contigs.par_iter().try_for_each(|contig| -> Result<()> {
        let mut reader = bam::IndexedReader::from_path(&args.reads)
            .with_context(|| format!("Failed to open {}", args.reads.display()))?;

        let records = coverage::contig_coverage(
            &mut reader,
            contig,
            blacklist_map
                .as_ref()
                .and_then(|map| map.get(contig.as_str())),
            &config,
        )?;

        let raw_out = args
            .outdir
            .join(format!("{}.{}.rawCov.bed.gz", args.sample, contig));
        super::write_records(&raw_out, &records)?;
        info!("{}: wrote {} bins to {}", contig, records.len(), raw_out.display());

        if args.normalize {
            match normalize(contig, &records) {
                Ok(normalized) => {
                    let norm_out = args
                        .outdir
                        .join(format!("{}.{}.normCov.bed.gz", args.sample, contig));
                    super::write_records(&norm_out, &normalized)?;
                }
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
    })
}

/// Resolve the contig list: an explicit `-L` file, every header contig, or
/// the canonical subset present in the header.
fn select_contigs(args: &GenomeArgs) -> Result<Vec<String>> {
    let reader = bam::IndexedReader::from_path(&args.reads)
        .with_context(|| format!("Failed to open {}", args.reads.display()))?;
    let header = reader.header().to_owned();

    let names: Vec<String> = (0..header.target_count())
        .map(|tid| {
            std::str::from_utf8(header.tid2name(tid))
                .map(str::to_string)
                .map_err(|_| anyhow!("Invalid contig name at TID {}", tid))
        })
        .collect::<Result<_>>()?;

    if let Some(list) = &args.contigs {
        let known: FxHashSet<&str> = names.iter().map(String::as_str).collect();
        let requested: Vec<String> = fs::read_to_string(list)
            .with_context(|| format!("Failed to read contig list {}", list.display()))?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        for contig in &requested {
            if !known.contains(contig.as_str()) {
                return Err(BinCovError::MissingContig(contig.clone()).into());
            }
        }
        Ok(requested)
    } else if args.all_contigs {
        Ok(names)
    } else {
        Ok(names
            .into_iter()
            .filter(|name| is_standard_contig(name))
            .collect())
    }
}
