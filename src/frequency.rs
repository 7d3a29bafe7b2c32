//! Rank-frequency tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row of a rank-frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub word: String,
    /// 1-based position in descending-frequency order.
    pub rank: usize,
    pub frequency: usize,
    /// The Zipf product `rank * frequency`.
    #[serde(rename = "rank*frequency")]
    pub rank_times_freq: usize,
}

/// Distinct words ordered by descending frequency, ties in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyEntry> {
        self.entries.iter()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all frequencies, i.e. the number of tokens counted.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.frequency).sum()
    }

    /// Words in rank order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }

    pub fn get(&self, word: &str) -> Option<&FrequencyEntry> {
        self.entries.iter().find(|e| e.word == word)
    }

    /// The first `n` ranks as a table of their own.
    pub fn prefix(&self, n: usize) -> FrequencyTable {
        FrequencyTable {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a FrequencyEntry;
    type IntoIter = std::slice::Iter<'a, FrequencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Counts the words and ranks them by descending frequency.
/// Words with equal frequency keep the order in which they first appeared.
/// # Example
/// ```
/// use corpus_analysis::frequency::rank;
/// let words: Vec<String> = ["b", "a", "a", "c", "b"].iter().map(|w| w.to_string()).collect();
/// let table = rank(&words);
/// let order: Vec<&str> = table.words().collect();
/// assert_eq!(order, vec!["b", "a", "c"]);
/// assert_eq!(table.total(), 5);
/// ```
pub fn rank(tokens: &[String]) -> FrequencyTable {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counted: Vec<(&str, usize)> = Vec::new();

    for token in tokens {
        match index.get(token.as_str()) {
            Some(&i) => counted[i].1 += 1,
            None => {
                index.insert(token.as_str(), counted.len());
                counted.push((token.as_str(), 1));
            }
        }
    }

    // sort_by is stable: equal counts stay in first-occurrence order
    counted.sort_by(|a, b| b.1.cmp(&a.1));

    let entries = counted
        .into_iter()
        .enumerate()
        .map(|(i, (word, frequency))| FrequencyEntry {
            word: word.to_string(),
            rank: i + 1,
            frequency,
            rank_times_freq: (i + 1) * frequency,
        })
        .collect();

    FrequencyTable { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_rank_counts_and_products() {
        let table = rank(&words("three two three one two three"));
        let rows: Vec<(&str, usize, usize, usize)> = table
            .iter()
            .map(|e| (e.word.as_str(), e.rank, e.frequency, e.rank_times_freq))
            .collect();
        assert_eq!(
            rows,
            vec![("three", 1, 3, 3), ("two", 2, 2, 4), ("one", 3, 1, 3)]
        );
    }

    #[test]
    fn ties_follow_first_occurrence() {
        // every word twice, first seen in the order z, m, a, q
        let table = rank(&words("z m a q q a m z"));
        assert_eq!(table.words().collect::<Vec<_>>(), vec!["z", "m", "a", "q"]);

        let mixed = rank(&words("kot pies kot ryba pies las"));
        assert_eq!(
            mixed.words().collect::<Vec<_>>(),
            vec!["kot", "pies", "ryba", "las"]
        );
    }

    #[test]
    fn total_equals_token_count() {
        let tokens = words("a b c a b a d e f g a");
        let table = rank(&tokens);
        assert_eq!(table.total(), tokens.len());
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn empty_tokens_empty_table() {
        let table = rank(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn prefix_and_lookup() {
        let table = rank(&words("x y y z z z"));
        let top = table.prefix(2);
        assert_eq!(top.words().collect::<Vec<_>>(), vec!["z", "y"]);
        assert_eq!(table.prefix(10).len(), 3);
        assert_eq!(table.get("y").map(|e| e.rank), Some(2));
        assert!(table.get("w").is_none());
    }
}
