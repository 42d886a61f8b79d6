//! Error types shared across the bincov library.

use thiserror::Error;

/// Everything that can go wrong while computing binned coverage.
#[derive(Error, Debug)]
pub enum BinCovError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("alignment file error: {0}")]
    Bam(#[from] rust_htslib::errors::Error),

    #[error("invalid coverage mode '{0}' (options: nucleotide, physical)")]
    InvalidMode(String),

    #[error("invalid interval {contig}:{start}-{end}: end must exceed start")]
    InvalidInterval {
        contig: String,
        start: u32,
        end: u32,
    },

    #[error("contig '{0}' not present in the alignment header")]
    MissingContig(String),

    #[error("no bin on '{0}' has non-zero coverage, normalization is undefined")]
    NoCoverage(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    ThresholdValidation {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BinCovError>;

/// Returns `true` if the error originated from a broken pipe.
#[inline]
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.root_cause()
        .downcast_ref::<std::io::Error>()
        .map(|io_err| io_err.kind() == std::io::ErrorKind::BrokenPipe)
        .unwrap_or(false)
}
