//! Dense count matrices over bounded vocabularies.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::relations::RelationIndex;

/// Occurrence-count classes shared with renderers:
/// `0`, `1`, `2..=10` and `>10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Zero,
    One,
    Few,
    Many,
}

impl Bucket {
    pub fn of(count: usize) -> Self {
        match count {
            0 => Bucket::Zero,
            1 => Bucket::One,
            2..=10 => Bucket::Few,
            _ => Bucket::Many,
        }
    }

    /// Bucket number, 0 to 3.
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Raw counts for every (row word, column word) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountMatrix {
    rows: Vec<String>,
    cols: Vec<String>,
    counts: Array2<usize>,
}

impl CountMatrix {
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn cols(&self) -> &[String] {
        &self.cols
    }

    pub fn counts(&self) -> &Array2<usize> {
        &self.counts
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        self.counts.dim()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<usize> {
        self.counts.get((row, col)).copied()
    }

    /// Count for a pair of words, `None` if either lies outside the matrix.
    pub fn get(&self, row_word: &str, col_word: &str) -> Option<usize> {
        let row = self.rows.iter().position(|w| w == row_word)?;
        let col = self.cols.iter().position(|w| w == col_word)?;
        self.cell(row, col)
    }

    pub fn buckets(&self) -> Array2<Bucket> {
        self.counts.mapv(Bucket::of)
    }

    pub fn nonzero_cells(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

/// Projects `index` onto a `rows x cols` grid. Pairs never seen are 0.
/// # Example
/// ```
/// use corpus_analysis::matrix::materialize;
/// use corpus_analysis::relations::RelationIndex;
/// let m = materialize(&RelationIndex::default(), &["red".to_string()], &["car".to_string(), "sky".to_string()]);
/// assert_eq!(m.shape(), (1, 2));
/// assert_eq!(m.get("red", "sky"), Some(0));
/// ```
pub fn materialize(index: &RelationIndex, rows: &[String], cols: &[String]) -> CountMatrix {
    let counts = Array2::from_shape_fn((rows.len(), cols.len()), |(i, j)| {
        index.get(&rows[i], &cols[j])
    });
    CountMatrix {
        rows: rows.to_vec(),
        cols: cols.to_vec(),
        counts,
    }
}

/// [`materialize`] over the first `size` words of each vocabulary.
pub fn materialize_top(
    index: &RelationIndex,
    rows: &[String],
    cols: &[String],
    size: usize,
) -> CountMatrix {
    let rows = &rows[..rows.len().min(size)];
    let cols = &cols[..cols.len().min(size)];
    materialize(index, rows, cols)
}
