//! Median normalization of raw per-bin counts.

use crate::core::error::{BinCovError, Result};
use crate::record::{CoverageRecord, NormalizedRecord};

/// Rescale raw counts by the median of the bins with non-zero coverage.
///
/// Zero-count bins are excluded from the median but kept in the output with
/// a depth of 0.0, and the input order is preserved. When every retained bin
/// is empty the median is undefined and a [`BinCovError::NoCoverage`] is
/// returned so the caller can decide whether to skip normalized output.
pub fn normalize(contig: &str, records: &[CoverageRecord]) -> Result<Vec<NormalizedRecord>> {
    let mut nonzero: Vec<u64> = records
        .iter()
        .map(|record| record.count)
        .filter(|&count| count > 0)
        .collect();
    if nonzero.is_empty() {
        return Err(BinCovError::NoCoverage(contig.to_string()));
    }
    nonzero.sort_unstable();
    let median = median_of_sorted(&nonzero);

    Ok(records
        .iter()
        .map(|record| NormalizedRecord {
            contig: record.contig.clone(),
            start: record.start,
            end: record.end,
            depth: record.count as f64 / median,
        })
        .collect())
}

fn median_of_sorted(values: &[u64]) -> f64 {
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid] as f64
    } else {
        (values[mid - 1] as f64 + values[mid] as f64) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::GenomicInterval;

    fn records(counts: &[u64]) -> Vec<CoverageRecord> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let start = i as u32 * 1_000;
                let bin = GenomicInterval::new("chr1", start, start + 1_000).unwrap();
                CoverageRecord::new(&bin, count)
            })
            .collect()
    }

    #[test]
    fn all_zero_coverage_is_an_error() {
        assert!(matches!(
            normalize("chr1", &records(&[0, 0, 0])),
            Err(BinCovError::NoCoverage(contig)) if contig == "chr1"
        ));
        assert!(normalize("chr1", &records(&[])).is_err());
    }

    #[test]
    fn single_covered_bin_normalizes_to_one() {
        let normalized = normalize("chr1", &records(&[1, 0, 0])).unwrap();
        assert_eq!(normalized.len(), 3);
        assert!((normalized[0].depth - 1.0).abs() < f64::EPSILON);
        assert_eq!(normalized[1].depth, 0.0);
    }

    #[test]
    fn median_ignores_zero_bins() {
        // non-zero counts 2, 4, 6 -> median 4
        let normalized = normalize("chr1", &records(&[0, 2, 0, 4, 6])).unwrap();
        assert!((normalized[3].depth - 1.0).abs() < f64::EPSILON);
        assert!((normalized[1].depth - 0.5).abs() < f64::EPSILON);
        assert!((normalized[4].depth - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn even_sized_median_averages_middle_pair() {
        // non-zero counts 2, 4 -> median 3
        let normalized = normalize("chr1", &records(&[2, 4])).unwrap();
        assert!((normalized[0].depth - 2.0 / 3.0).abs() < 1e-12);
        assert!((normalized[1].depth - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn scaling_conserves_total_coverage() {
        let raw = records(&[0, 3, 9, 1, 7, 7, 0, 2]);
        let normalized = normalize("chr1", &raw).unwrap();
        // non-zero counts sorted: 1 2 3 7 7 9 -> median 5
        let median = 5.0;
        let raw_sum: f64 = raw.iter().map(|record| record.count as f64).sum();
        let scaled_sum: f64 = normalized.iter().map(|record| record.depth * median).sum();
        assert!((raw_sum - scaled_sum).abs() < 1e-9);
    }

    #[test]
    fn order_is_preserved() {
        let normalized = normalize("chr1", &records(&[5, 0, 2])).unwrap();
        let starts: Vec<u32> = normalized.iter().map(|record| record.start).collect();
        assert_eq!(starts, vec![0, 1_000, 2_000]);
    }
}
