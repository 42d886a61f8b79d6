//! bincov - binned coverage of coordinate-sorted alignments.
//!
//! Computes non-duplicate, primary-aligned nucleotide or physical coverage
//! in fixed-width bins, the per-contig signal consumed by copy-number and
//! structural-variant pipelines.
//!
//! # Usage
//!
//! ```bash
//! # Raw 1 kb nucleotide coverage of one contig
//! bincov contig sample.bam chr1 chr1.cov.bed
//!
//! # Physical coverage with a blacklist and normalized output
//! bincov contig sample.bam chr1 chr1.cov.bed -m physical -x blacklist.bed -n chr1.norm.bed
//!
//! # Per-contig coverage files for a whole sample
//! bincov genome sample.bam SAMPLE01 covdir/ -N -t 8
//! ```

extern crate bincov_lib;
pub mod commands;

use anyhow::Result;
use bincov_lib::core::error::is_broken_pipe;
use env_logger::Env;
use log::*;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case", author, about)]
/// Binned nucleotide and physical coverage from alignments
struct Args {
    #[structopt(subcommand)]
    subcommand: Subcommand,
}

#[derive(StructOpt)]
enum Subcommand {
    /// Binned coverage for a single contig
    Contig(commands::contig::ContigArgs),
    /// Per-contig binned coverage across the whole alignment file
    Genome(commands::genome::GenomeArgs),
}

impl Subcommand {
    fn run(self) -> Result<()> {
        match self {
            Subcommand::Contig(args) => commands::contig::run(args)?,
            Subcommand::Genome(args) => commands::genome::run(args)?,
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    if let Err(err) = Args::from_args().subcommand.run() {
        if is_broken_pipe(&err) {
            std::process::exit(0);
        }
        error!("{}", err);
        std::process::exit(1);
    }
    Ok(())
}
