//! Word adjacency graph built from sentence-local bigrams.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use log::info;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"));
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

/// Undirected weighted edge. `source <= target` lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: usize,
}

/// Nodes and edges sorted by word, so equal inputs give equal graphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyGraph {
    nodes: Vec<String>,
    edges: Vec<Edge>,
}

impl AdjacencyGraph {
    fn from_edges(mut edges: Vec<Edge>) -> Self {
        edges.sort();
        let nodes: BTreeSet<&str> = edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        let nodes = nodes.into_iter().map(String::from).collect();
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, word: &str) -> bool {
        self.nodes.binary_search_by(|n| n.as_str().cmp(word)).is_ok()
    }

    /// Weight of the edge between `a` and `b` in either order.
    pub fn weight(&self, a: &str, b: &str) -> Option<usize> {
        let (source, target) = canonical(a, b);
        self.edges
            .binary_search_by(|e| (e.source.as_str(), e.target.as_str()).cmp(&(source, target)))
            .ok()
            .map(|i| self.edges[i].weight)
    }

    /// Number of edge endpoints at `word`; a self-loop counts twice.
    pub fn degree(&self, word: &str) -> usize {
        self.edges
            .iter()
            .map(|e| (e.source == word) as usize + (e.target == word) as usize)
            .sum()
    }

    /// Subgraph induced by the `n` nodes of highest degree (ties by word).
    /// Selected nodes are kept even when none of their edges survive.
    pub fn top_by_degree(&self, n: usize) -> AdjacencyGraph {
        let mut degrees: HashMap<&str, usize> = HashMap::new();
        for e in &self.edges {
            *degrees.entry(e.source.as_str()).or_insert(0) += 1;
            *degrees.entry(e.target.as_str()).or_insert(0) += 1;
        }
        let mut ranked: Vec<(&str, usize)> = degrees.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let keep: HashSet<&str> = ranked.into_iter().take(n).map(|(w, _)| w).collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| keep.contains(e.source.as_str()) && keep.contains(e.target.as_str()))
            .cloned()
            .collect();
        let mut nodes: Vec<String> = keep.into_iter().map(String::from).collect();
        nodes.sort();
        AdjacencyGraph { nodes, edges }
    }
}

fn canonical<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

fn count_segment(segment: &str, pairs: &mut HashMap<(String, String), usize>) {
    let lowered = segment.to_lowercase();
    let cleaned = NON_WORD_RE.replace_all(&lowered, " ");
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    for pair in words.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if first.chars().count() > 1 && second.chars().count() > 1 {
            let (a, b) = canonical(first, second);
            *pairs.entry((a.to_string(), b.to_string())).or_insert(0) += 1;
        }
    }
}

/// Builds the word adjacency graph of `text`.
/// The text is split into sentences at runs of `.`, `!` or `?`. Inside a sentence every
/// pair of neighbouring words longer than one character is counted as an undirected pair.
/// Only pairs seen at least `min_weight` times become edges, and only their words become nodes.
/// # Example
/// ```
/// use corpus_analysis::cooccurrence::build;
/// let graph = build("the cat sat. the cat ran.", 2).unwrap();
/// assert_eq!(graph.weight("the", "cat"), Some(2));
/// assert_eq!(graph.weight("cat", "sat"), None);
/// ```
pub fn build(text: &str, min_weight: usize) -> Result<AdjacencyGraph> {
    if min_weight == 0 {
        return Err(AnalysisError::invalid("minimum edge weight must be positive"));
    }

    let segments: Vec<&str> = SENTENCE_END_RE.split(text).collect();

    // Per-segment counts are summed, so the merge order does not matter.
    let pairs = segments
        .par_iter()
        .fold(HashMap::new, |mut acc, segment| {
            count_segment(segment, &mut acc);
            acc
        })
        .reduce(HashMap::new, |mut merged, part| {
            for (key, count) in part {
                *merged.entry(key).or_insert(0) += count;
            }
            merged
        });

    let edges: Vec<Edge> = pairs
        .into_iter()
        .filter(|(_, weight)| *weight >= min_weight)
        .map(|((source, target), weight)| Edge {
            source,
            target,
            weight,
        })
        .collect();

    let graph = AdjacencyGraph::from_edges(edges);
    info!(
        "Adjacency graph: {} nodes, {} edges (min weight {})",
        graph.node_count(),
        graph.edge_count(),
        min_weight
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_pairs_pass_threshold() {
        let g = build("the cat sat. the cat ran.", 2).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.weight("cat", "the"), Some(2));
        assert_eq!(g.weight("the", "cat"), Some(2));
        assert_eq!(g.weight("cat", "sat"), None);
        assert_eq!(g.nodes(), &["cat".to_string(), "the".to_string()]);
        // below-threshold words are not isolated nodes
        assert!(!g.contains_node("sat"));
        assert!(!g.contains_node("ran"));
    }

    #[test]
    fn pairs_do_not_cross_sentence_ends() {
        let g = build("alpha beta!!! gamma alpha?! beta gamma", 1).unwrap();
        assert_eq!(g.weight("alpha", "beta"), Some(1));
        assert_eq!(g.weight("alpha", "gamma"), Some(1));
        assert_eq!(g.weight("beta", "gamma"), Some(1));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn punctuation_becomes_space_and_short_words_break_pairs() {
        // "x" is one character, so neither (dog, x) nor (x, cat) counts
        let g = build("Dog, x cat; DOG-cat", 1).unwrap();
        assert_eq!(g.weight("cat", "dog"), Some(2));
        assert_eq!(g.edge_count(), 1);
        assert!(!g.contains_node("x"));
    }

    #[test]
    fn repeated_word_forms_self_edge() {
        let g = build("very very good. very very bad.", 2).unwrap();
        assert_eq!(g.weight("very", "very"), Some(2));
        assert_eq!(g.degree("very"), 2);
    }

    #[test]
    fn edges_are_sorted_and_stable() {
        let text = "zeta alpha. zeta alpha. beta zeta. beta zeta. alpha beta. alpha beta.";
        let g1 = build(text, 2).unwrap();
        let g2 = build(text, 2).unwrap();
        assert_eq!(g1, g2);
        let keys: Vec<(&str, &str)> = g1
            .edges()
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("alpha", "beta"), ("alpha", "zeta"), ("beta", "zeta")]
        );
    }

    #[test]
    fn empty_text_gives_empty_graph() {
        let g = build("", 1).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(build("...!?", 1).unwrap().is_empty());
    }

    #[test]
    fn zero_weight_is_rejected() {
        assert!(matches!(
            build("a b", 0),
            Err(AnalysisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn top_by_degree_keeps_hubs() {
        let g = build("hub aa. hub bb. hub cc. aa bb.", 1).unwrap();
        assert_eq!(g.degree("hub"), 3);
        let top = g.top_by_degree(3);
        // hub=3, aa=2, bb=2, cc=1
        assert_eq!(
            top.nodes(),
            &["aa".to_string(), "bb".to_string(), "hub".to_string()]
        );
        assert_eq!(top.edge_count(), 3);
        assert_eq!(top.weight("hub", "cc"), None);
        assert_eq!(g.top_by_degree(0).node_count(), 0);
    }
}
