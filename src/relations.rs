//! Positional co-occurrence counts between two class vocabularies.
//!
//! Counting is purely positional: a class-A word next to a class-B word is
//! counted even across a sentence boundary, and no syntactic role is checked.

use std::collections::{BTreeMap, HashSet};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::pos::{PosClass, TaggedToken};

/// Offsets, relative to a target word, at which partner words are looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    offsets: Vec<isize>,
}

impl Window {
    pub fn new(offsets: Vec<isize>) -> Result<Self> {
        if offsets.is_empty() {
            return Err(AnalysisError::invalid("relation window needs at least one offset"));
        }
        if offsets.contains(&0) {
            return Err(AnalysisError::invalid("relation window offset 0 is the target itself"));
        }
        let mut seen = HashSet::with_capacity(offsets.len());
        if let Some(dup) = offsets.iter().find(|o| !seen.insert(**o)) {
            return Err(AnalysisError::invalid(format!(
                "relation window offset {dup} is listed twice"
            )));
        }
        Ok(Self { offsets })
    }

    /// Only the word right before the target.
    pub fn preceding() -> Self {
        Self { offsets: vec![-1] }
    }

    /// The words right before and right after the target.
    pub fn around() -> Self {
        Self {
            offsets: vec![-1, 1],
        }
    }

    pub fn offsets(&self) -> &[isize] {
        &self.offsets
    }
}

/// The class pairs the analysis relates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    AdjectiveNoun,
    VerbNoun,
}

impl RelationKind {
    pub fn source_class(self) -> PosClass {
        match self {
            RelationKind::AdjectiveNoun => PosClass::Adjective,
            RelationKind::VerbNoun => PosClass::Verb,
        }
    }

    pub fn target_class(self) -> PosClass {
        PosClass::Noun
    }

    /// Adjectives are looked for before the noun, verbs on both sides.
    pub fn default_window(self) -> Window {
        match self {
            RelationKind::AdjectiveNoun => Window::preceding(),
            RelationKind::VerbNoun => Window::around(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RelationKind::AdjectiveNoun => "adjective-noun",
            RelationKind::VerbNoun => "verb-noun",
        }
    }
}

/// `source word -> target word -> count`. Zero counts are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationIndex {
    links: BTreeMap<String, BTreeMap<String, usize>>,
}

impl RelationIndex {
    fn increment(&mut self, source: &str, target: &str) {
        *self
            .links
            .entry(source.to_string())
            .or_default()
            .entry(target.to_string())
            .or_insert(0) += 1;
    }

    /// Count for the pair, 0 if never seen.
    pub fn get(&self, source: &str, target: &str) -> usize {
        self.links
            .get(source)
            .and_then(|targets| targets.get(target))
            .copied()
            .unwrap_or(0)
    }

    pub fn targets(&self, source: &str) -> Option<&BTreeMap<String, usize>> {
        self.links.get(source)
    }

    /// Targets of `source` by descending count, ties alphabetical.
    pub fn ranked_targets(&self, source: &str) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .links
            .get(source)
            .map(|targets| targets.iter().map(|(t, c)| (t.as_str(), *c)).collect())
            .unwrap_or_default();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, usize>)> {
        self.links.iter().map(|(s, t)| (s.as_str(), t))
    }

    /// Number of distinct source words.
    pub fn source_count(&self) -> usize {
        self.links.len()
    }

    /// Number of distinct (source, target) pairs.
    pub fn link_count(&self) -> usize {
        self.links.values().map(|t| t.len()).sum()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.links.values().flat_map(|t| t.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Counts how often words of `sources` sit at a `window` offset from words of `targets`.
/// For each position holding a target word, every in-range offset holding a source word
/// adds one to `index[source][target]`. Membership is decided by the word alone.
/// # Example
/// ```
/// use corpus_analysis::pos::{PosClass, TaggedToken};
/// use corpus_analysis::relations::{extract, Window};
/// let stream = vec![
///     TaggedToken::new("red", Some(PosClass::Adjective)),
///     TaggedToken::new("car", Some(PosClass::Noun)),
/// ];
/// let index = extract(&stream, &["red".to_string()], &["car".to_string()], &Window::preceding());
/// assert_eq!(index.get("red", "car"), 1);
/// ```
pub fn extract(
    stream: &[TaggedToken],
    sources: &[String],
    targets: &[String],
    window: &Window,
) -> RelationIndex {
    let sources: HashSet<&str> = sources.iter().map(String::as_str).collect();
    let targets: HashSet<&str> = targets.iter().map(String::as_str).collect();
    let mut index = RelationIndex::default();

    for (i, token) in stream.iter().enumerate() {
        if !targets.contains(token.word.as_str()) {
            continue;
        }
        for &offset in window.offsets() {
            let Some(j) = i.checked_add_signed(offset) else {
                continue;
            };
            if let Some(neighbor) = stream.get(j) {
                if sources.contains(neighbor.word.as_str()) {
                    index.increment(&neighbor.word, &token.word);
                }
            }
        }
    }

    info!(
        "Relation index: {} source words, {} distinct links, {} occurrences",
        index.source_count(),
        index.link_count(),
        index.total()
    );
    index
}
