#![forbid(unsafe_code)]
//! # Corpus analysis
//!
//! Lexical profiling of a text corpus:
//!
//! - a rank-frequency table with the Zipf product `rank * frequency`,
//! - the smallest set of top-ranked words covering a share of all occurrences,
//! - an undirected word adjacency graph from sentence-local bigrams,
//! - top nouns, adjectives and verbs (via an external tagger), with
//!   adjective→noun and verb→noun co-occurrence counts and count matrices.
//!
//! Everything is computed in one batch pass over a corpus held in memory.
//!
//! ## Example
//! ```
//! use corpus_analysis::{AnalysisOptions, analyze_text};
//! let options = AnalysisOptions { min_edge_weight: 2, ..AnalysisOptions::default() };
//! let analysis = analyze_text("The cat sat. The cat ran.", &options, None).unwrap();
//! assert_eq!(analysis.table.total(), 6);
//! assert_eq!(analysis.graph.weight("the", "cat"), Some(2));
//! ```

pub mod cooccurrence;
pub mod corpus;
pub mod coverage;
pub mod error;
pub mod export;
pub mod frequency;
pub mod matrix;
pub mod pos;
pub mod relations;
pub mod tokenize;

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

pub use cooccurrence::{AdjacencyGraph, Edge};
pub use corpus::{collect_files, load_corpus};
pub use coverage::Coverage;
pub use error::{AnalysisError, Result};
pub use export::{ExportFormat, export_analysis, render_summary};
pub use frequency::{FrequencyEntry, FrequencyTable};
pub use matrix::{Bucket, CountMatrix};
pub use pos::{LexiconTagger, PosClass, PosConfig, PosVocabulary, TagOracle, TagScheme};
pub use relations::{RelationIndex, RelationKind, Window};
pub use tokenize::TokenizerConfig;

/// Every knob of a full analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Hard cap on tokens read from the corpus.
    pub max_tokens: usize,
    /// One-letter words kept by the tokenizer.
    pub single_letter_words: Vec<String>,
    /// Share of occurrences the coverage cutoff must reach, in (0, 1].
    pub coverage_fraction: f64,
    /// Minimum co-occurrence count for a graph edge.
    pub min_edge_weight: usize,
    /// Words kept per grammatical class.
    pub top_n: usize,
    /// Rows and columns of the relation matrices.
    pub matrix_size: usize,
    pub tag_batch_size: usize,
    pub tag_scheme: TagScheme,
    pub min_class_word_len: usize,
    /// Offsets at which adjectives are looked up around a noun.
    pub adjective_window: Vec<isize>,
    /// Offsets at which verbs are looked up around a noun.
    pub verb_window: Vec<isize>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        let tokenizer = TokenizerConfig::default();
        let pos = PosConfig::default();
        Self {
            max_tokens: tokenizer.max_tokens,
            single_letter_words: tokenizer.single_letter_words,
            coverage_fraction: 0.9,
            min_edge_weight: 3,
            top_n: pos.top_n,
            matrix_size: 50,
            tag_batch_size: pos.batch_size,
            tag_scheme: pos.scheme,
            min_class_word_len: pos.min_word_len,
            adjective_window: RelationKind::AdjectiveNoun.default_window().offsets().to_vec(),
            verb_window: RelationKind::VerbNoun.default_window().offsets().to_vec(),
        }
    }
}

impl AnalysisOptions {
    /// Rejects out-of-range settings before any text is scanned.
    pub fn validate(&self) -> Result<()> {
        if !(self.coverage_fraction > 0.0 && self.coverage_fraction <= 1.0) {
            return Err(AnalysisError::invalid(format!(
                "coverage fraction must be in (0, 1], got {}",
                self.coverage_fraction
            )));
        }
        if self.min_edge_weight == 0 {
            return Err(AnalysisError::invalid("minimum edge weight must be positive"));
        }
        if self.matrix_size == 0 {
            return Err(AnalysisError::invalid("matrix size must be positive"));
        }
        self.pos_config().validate()?;
        self.window(RelationKind::AdjectiveNoun)?;
        self.window(RelationKind::VerbNoun)?;
        Ok(())
    }

    pub fn tokenizer_config(&self) -> TokenizerConfig {
        TokenizerConfig {
            max_tokens: self.max_tokens,
            single_letter_words: self.single_letter_words.clone(),
        }
    }

    pub fn pos_config(&self) -> PosConfig {
        PosConfig {
            top_n: self.top_n,
            batch_size: self.tag_batch_size,
            scheme: self.tag_scheme.clone(),
            min_word_len: self.min_class_word_len,
        }
    }

    pub fn window(&self, kind: RelationKind) -> Result<Window> {
        match kind {
            RelationKind::AdjectiveNoun => Window::new(self.adjective_window.clone()),
            RelationKind::VerbNoun => Window::new(self.verb_window.clone()),
        }
    }
}

/// Part-of-speech results; present when a tagger was supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosAnalysis {
    pub vocabulary: PosVocabulary,
    pub adjective_noun: RelationIndex,
    pub verb_noun: RelationIndex,
    pub adjective_noun_matrix: CountMatrix,
    pub verb_noun_matrix: CountMatrix,
}

impl PosAnalysis {
    pub fn relation(&self, kind: RelationKind) -> &RelationIndex {
        match kind {
            RelationKind::AdjectiveNoun => &self.adjective_noun,
            RelationKind::VerbNoun => &self.verb_noun,
        }
    }

    pub fn matrix(&self, kind: RelationKind) -> &CountMatrix {
        match kind {
            RelationKind::AdjectiveNoun => &self.adjective_noun_matrix,
            RelationKind::VerbNoun => &self.verb_noun_matrix,
        }
    }
}

/// Everything derived from one corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusAnalysis {
    /// Tokens kept after the cap.
    pub token_count: usize,
    /// Whether `max_tokens` cut the corpus short.
    pub truncated: bool,
    pub table: FrequencyTable,
    pub coverage: Coverage,
    pub graph: AdjacencyGraph,
    pub pos: Option<PosAnalysis>,
}

fn analyze_pos(
    tokens: &[String],
    table: &FrequencyTable,
    oracle: &dyn TagOracle,
    options: &AnalysisOptions,
) -> Result<PosAnalysis> {
    let pos_config = options.pos_config();
    let vocabulary_words: Vec<String> = table.words().map(String::from).collect();
    let tags = pos::tag_vocabulary(&vocabulary_words, oracle, pos_config.batch_size)?;
    let vocabulary = pos::classify_tagged(table, &tags, &pos_config)?;
    let stream = pos::tag_tokens(tokens, &tags, &pos_config.scheme);

    let relation = |kind: RelationKind| -> Result<(RelationIndex, CountMatrix)> {
        let sources = vocabulary.get(kind.source_class());
        let targets = vocabulary.get(kind.target_class());
        let index = relations::extract(&stream, sources, targets, &options.window(kind)?);
        let matrix = matrix::materialize_top(&index, sources, targets, options.matrix_size);
        Ok((index, matrix))
    };
    let (adjective_noun, adjective_noun_matrix) = relation(RelationKind::AdjectiveNoun)?;
    let (verb_noun, verb_noun_matrix) = relation(RelationKind::VerbNoun)?;

    Ok(PosAnalysis {
        vocabulary,
        adjective_noun,
        verb_noun,
        adjective_noun_matrix,
        verb_noun_matrix,
    })
}

/// Runs the whole analysis on `text`.
/// The part-of-speech stages only run when `oracle` is given. Text beyond the
/// token cap is invisible to every stage, including the adjacency graph.
pub fn analyze_text(
    text: &str,
    options: &AnalysisOptions,
    oracle: Option<&dyn TagOracle>,
) -> Result<CorpusAnalysis> {
    options.validate()?;

    let tokenized = tokenize::tokenize_with_extent(text, &options.tokenizer_config());
    info!(
        "Tokenized {} words{}",
        tokenized.tokens.len(),
        if tokenized.truncated { " (capped)" } else { "" }
    );

    let table = frequency::rank(&tokenized.tokens);
    info!("Found {} distinct words", table.len());

    let coverage = coverage::cutoff(&table, options.coverage_fraction)?;
    let graph = cooccurrence::build(&text[..tokenized.extent], options.min_edge_weight)?;

    let pos = match oracle {
        Some(oracle) => Some(analyze_pos(&tokenized.tokens, &table, oracle, options)?),
        None => None,
    };

    Ok(CorpusAnalysis {
        token_count: tokenized.tokens.len(),
        truncated: tokenized.truncated,
        table,
        coverage,
        graph,
        pos,
    })
}

/// Loads the corpus at `path` (file or directory) and analyzes it.
/// Configuration is checked first and an unreadable corpus aborts before any analysis.
pub fn analyze_path(
    path: &Path,
    options: &AnalysisOptions,
    oracle: Option<&dyn TagOracle>,
) -> Result<CorpusAnalysis> {
    options.validate()?;
    let text = load_corpus(path)?;
    analyze_text(&text, options, oracle)
}
