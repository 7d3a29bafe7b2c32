//! Smallest vocabulary prefix covering a share of all occurrences.

use log::info;
use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::frequency::FrequencyTable;

/// Result of a coverage search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coverage {
    /// Number of top-ranked words needed to reach the target.
    pub cutoff_rank: usize,
    pub target_fraction: f64,
    /// The first `cutoff_rank` entries of the table.
    pub prefix: FrequencyTable,
    /// Distinct words in the full table.
    pub distinct_words: usize,
}

impl Coverage {
    /// Percentage of distinct words that make up the prefix.
    pub fn vocabulary_share(&self) -> f64 {
        if self.distinct_words == 0 {
            0.0
        } else {
            100.0 * self.cutoff_rank as f64 / self.distinct_words as f64
        }
    }
}

/// Finds the smallest prefix of `table` whose cumulative frequency reaches
/// `target_fraction` of all occurrences. Falls back to the whole table if the
/// threshold is never met (fraction 1.0 and float rounding).
/// # Example
/// ```
/// use corpus_analysis::coverage::cutoff;
/// use corpus_analysis::frequency::rank;
/// let words: Vec<String> = "a a a a a b b b c c".split(' ').map(String::from).collect();
/// let coverage = cutoff(&rank(&words), 0.9).unwrap();
/// assert_eq!(coverage.cutoff_rank, 3);
/// ```
pub fn cutoff(table: &FrequencyTable, target_fraction: f64) -> Result<Coverage> {
    if !(target_fraction > 0.0 && target_fraction <= 1.0) {
        return Err(AnalysisError::invalid(format!(
            "coverage fraction must be in (0, 1], got {target_fraction}"
        )));
    }

    let threshold = target_fraction * table.total() as f64;
    let mut cumulative = 0usize;
    let mut cutoff_rank = table.len();

    for entry in table {
        cumulative += entry.frequency;
        if cumulative as f64 >= threshold {
            cutoff_rank = entry.rank;
            break;
        }
    }

    let coverage = Coverage {
        cutoff_rank,
        target_fraction,
        prefix: table.prefix(cutoff_rank),
        distinct_words: table.len(),
    };
    info!(
        "{:.0}% of occurrences covered by {} of {} distinct words ({:.2}%)",
        target_fraction * 100.0,
        coverage.cutoff_rank,
        coverage.distinct_words,
        coverage.vocabulary_share()
    );
    Ok(coverage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::rank;

    fn table(counts: &[(&str, usize)]) -> FrequencyTable {
        let words: Vec<String> = counts
            .iter()
            .flat_map(|(w, n)| std::iter::repeat(w.to_string()).take(*n))
            .collect();
        rank(&words)
    }

    #[test]
    fn ninety_percent_needs_third_rank() {
        let t = table(&[("a", 5), ("b", 3), ("c", 2)]);
        let c = cutoff(&t, 0.9).unwrap();
        assert_eq!(c.cutoff_rank, 3);
        assert_eq!(c.prefix.len(), 3);
    }

    #[test]
    fn exact_threshold_stops_early() {
        let t = table(&[("a", 5), ("b", 3), ("c", 2)]);
        assert_eq!(cutoff(&t, 0.8).unwrap().cutoff_rank, 2);
        assert_eq!(cutoff(&t, 0.5).unwrap().cutoff_rank, 1);
        let c = cutoff(&t, 0.5).unwrap();
        assert_eq!(c.prefix.words().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn full_fraction_is_whole_table() {
        let t = table(&[("a", 7), ("b", 1), ("c", 1), ("d", 1)]);
        let c = cutoff(&t, 1.0).unwrap();
        assert_eq!(c.cutoff_rank, 4);
        assert!((c.vocabulary_share() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_table_is_zero_not_error() {
        let c = cutoff(&FrequencyTable::default(), 0.9).unwrap();
        assert_eq!(c.cutoff_rank, 0);
        assert!(c.prefix.is_empty());
        assert_eq!(c.vocabulary_share(), 0.0);
    }

    #[test]
    fn fraction_out_of_range_is_rejected() {
        let t = table(&[("a", 1)]);
        for bad in [0.0, -0.1, 1.01, f64::NAN] {
            assert!(matches!(
                cutoff(&t, bad),
                Err(AnalysisError::InvalidArgument(_))
            ));
        }
    }
}
