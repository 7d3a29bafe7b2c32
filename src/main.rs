#![forbid(unsafe_code)]
//! # Corpus Analysis CLI
//!
//! Command-line interface for the `corpus_analysis` crate.
//! Profiles a `.txt`/`.pdf` corpus (or a directory of them) and exports the
//! results next to a short report on stdout.
//!
//! ## Features
//! - Rank-frequency table with the Zipf product, and the 90% coverage cutoff.
//! - Word adjacency graph from sentence-local bigrams.
//! - With `--tags`, top nouns/adjectives/verbs plus adjective→noun and
//!   verb→noun link lists and count matrices.
//!
//! ## Example
//! ```bash
//! cargo run --release -- corpus/corpus.txt --min-weight 3 --tags lexicon.txt --export-format csv
//! ```
//!
//! See `--help` for all available options.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use corpus_analysis::{
    AnalysisOptions, ExportFormat, LexiconTagger, Result, TagOracle, TagScheme, analyze_path,
    export_analysis, render_summary,
};
use log::{error, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Tagset {
    /// Penn Treebank tags (NN*, JJ*, VB*)
    Penn,
    /// Universal POS tags (NOUN, ADJ, VERB)
    Universal,
}

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Corpus file or directory to analyze
    path: PathBuf,

    /// Maximum number of tokens read from the corpus
    #[arg(long, default_value_t = 100_000)]
    max_tokens: usize,

    /// Share of all occurrences the coverage cutoff must reach, in (0, 1]
    #[arg(long, default_value_t = 0.9)]
    coverage: f64,

    /// One-letter words kept by the tokenizer, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = ["i".to_string(), "a".to_string()])]
    single_letter_words: Vec<String>,

    /// Minimum co-occurrence count for an adjacency graph edge
    #[arg(long, default_value_t = 3)]
    min_weight: usize,

    /// Optional lexicon file (`word TAG` per line) used as the POS tagger
    #[arg(long)]
    tags: Option<PathBuf>,

    /// Tagset used by the lexicon
    #[arg(long, value_enum, default_value = "penn")]
    tagset: Tagset,

    /// Words kept per grammatical class
    #[arg(long, default_value_t = 100)]
    top_n: usize,

    /// Rows and columns of the relation matrices
    #[arg(long, default_value_t = 50)]
    matrix_size: usize,

    /// Words per tagger call
    #[arg(long, default_value_t = 1000)]
    batch_size: usize,

    /// Minimum length of words admitted to a grammatical class
    #[arg(long, default_value_t = 1)]
    min_class_len: usize,

    /// Offsets around a noun where adjectives are looked up, e.g. `-1` or `-2,-1`
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = [-1])]
    adjective_window: Vec<isize>,

    /// Offsets around a noun where verbs are looked up
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = [-1, 1])]
    verb_window: Vec<isize>,

    /// Output format for export (txt, csv, tsv, json)
    #[arg(long, value_enum, default_value = "csv")]
    export_format: ExportFormat,

    /// Directory receiving the exported files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Rows of the frequency table printed to stdout
    #[arg(long, default_value_t = 30)]
    show: usize,
}

impl Cli {
    fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            max_tokens: self.max_tokens,
            coverage_fraction: self.coverage,
            min_edge_weight: self.min_weight,
            top_n: self.top_n,
            matrix_size: self.matrix_size,
            tag_batch_size: self.batch_size,
            tag_scheme: match self.tagset {
                Tagset::Penn => TagScheme::penn(),
                Tagset::Universal => TagScheme::universal(),
            },
            min_class_word_len: self.min_class_len,
            single_letter_words: self
                .single_letter_words
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            adjective_window: self.adjective_window.clone(),
            verb_window: self.verb_window.clone(),
        }
    }
}

fn export_stem(path: &Path) -> String {
    if path.is_dir() {
        "combined".to_string()
    } else {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "corpus".to_string())
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.options();
    options.validate()?;

    let tagger = match &cli.tags {
        Some(path) => {
            let tagger = LexiconTagger::from_path(path)?;
            info!("Loaded {} lexicon entries from {}", tagger.len(), path.display());
            Some(tagger)
        }
        None => None,
    };
    let oracle = tagger.as_ref().map(|t| t as &dyn TagOracle);

    let analysis = analyze_path(&cli.path, &options, oracle)?;
    println!("{}", render_summary(&analysis, cli.show)?);

    let written = export_analysis(
        &analysis,
        &cli.out_dir,
        &export_stem(&cli.path),
        cli.export_format,
    )?;
    for path in written {
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
