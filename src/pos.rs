//! Part-of-speech vocabularies built on an external tagger.
//!
//! The tagger is an opaque [`TagOracle`]: it receives batches of words and
//! answers with `(word, tag)` pairs. Tags are mapped to [`PosClass`] with a
//! [`TagScheme`] of prefixes, so Penn Treebank (`NN*`, `JJ*`, `VB*`) and
//! universal (`NOUN`, `ADJ`, `VERB`) taggers both work.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::frequency::FrequencyTable;

/// Default number of words sent to the oracle per call.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Grammatical classes tracked by the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosClass {
    Noun,
    Adjective,
    Verb,
}

/// Tag prefixes identifying each class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagScheme {
    pub noun_prefix: String,
    pub adjective_prefix: String,
    pub verb_prefix: String,
}

impl TagScheme {
    /// Penn Treebank tags (`NN`, `NNS`, `JJR`, `VBD`, ...).
    pub fn penn() -> Self {
        Self {
            noun_prefix: "NN".to_string(),
            adjective_prefix: "JJ".to_string(),
            verb_prefix: "VB".to_string(),
        }
    }

    /// Universal POS tags (`NOUN`, `ADJ`, `VERB`).
    pub fn universal() -> Self {
        Self {
            noun_prefix: "NOUN".to_string(),
            adjective_prefix: "ADJ".to_string(),
            verb_prefix: "VERB".to_string(),
        }
    }

    pub fn class_of(&self, tag: &str) -> Option<PosClass> {
        if tag.starts_with(&self.noun_prefix) {
            Some(PosClass::Noun)
        } else if tag.starts_with(&self.adjective_prefix) {
            Some(PosClass::Adjective)
        } else if tag.starts_with(&self.verb_prefix) {
            Some(PosClass::Verb)
        } else {
            None
        }
    }
}

impl Default for TagScheme {
    fn default() -> Self {
        Self::penn()
    }
}

/// External batch tagger.
pub trait TagOracle {
    /// Tags a batch of words, answering in input order. Words the tagger
    /// cannot tag may be left out.
    fn tag(&self, batch: &[String]) -> Result<Vec<(String, String)>>;
}

impl<F> TagOracle for F
where
    F: Fn(&[String]) -> Result<Vec<(String, String)>>,
{
    fn tag(&self, batch: &[String]) -> Result<Vec<(String, String)>> {
        self(batch)
    }
}

/// Oracle backed by a fixed word-to-tag lexicon.
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    lexicon: HashMap<String, String>,
}

impl LexiconTagger {
    pub fn new(lexicon: HashMap<String, String>) -> Self {
        Self { lexicon }
    }

    /// Reads `word TAG` lines. Blank lines and lines starting with `#` are
    /// skipped; words are lowercased to match tokens.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lexicon = HashMap::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(word), Some(tag)) => {
                    lexicon.insert(word.to_lowercase(), tag.to_string());
                }
                _ => {
                    return Err(AnalysisError::invalid(format!(
                        "lexicon line {} has no tag: {line:?}",
                        number + 1
                    )));
                }
            }
        }
        Ok(Self { lexicon })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }
}

impl TagOracle for LexiconTagger {
    fn tag(&self, batch: &[String]) -> Result<Vec<(String, String)>> {
        Ok(batch
            .iter()
            .filter_map(|w| self.lexicon.get(w).map(|t| (w.clone(), t.clone())))
            .collect())
    }
}

/// Word-to-tag mapping produced by the oracle.
pub type TagMap = HashMap<String, String>;

/// Tags `words` through `oracle` in batches of `batch_size`, in input order.
/// If the oracle tags a word twice the last tag wins.
pub fn tag_vocabulary(
    words: &[String],
    oracle: &dyn TagOracle,
    batch_size: usize,
) -> Result<TagMap> {
    if batch_size == 0 {
        return Err(AnalysisError::invalid("tagging batch size must be positive"));
    }

    let mut tags = TagMap::with_capacity(words.len());
    for (i, batch) in words.chunks(batch_size).enumerate() {
        let tagged = oracle.tag(batch)?;
        debug!("Tagged batch {} ({} words, {} tags)", i + 1, batch.len(), tagged.len());
        for (word, tag) in tagged {
            if let Some(previous) = tags.insert(word.clone(), tag.clone()) {
                if previous != tag {
                    warn!("Oracle tagged {word:?} as both {previous} and {tag}; keeping {tag}");
                }
            }
        }
    }
    Ok(tags)
}

/// Settings for building class vocabularies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosConfig {
    /// Words kept per class.
    pub top_n: usize,
    pub batch_size: usize,
    pub scheme: TagScheme,
    /// Shorter words are not admitted to any class.
    pub min_word_len: usize,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            top_n: 100,
            batch_size: DEFAULT_BATCH_SIZE,
            scheme: TagScheme::penn(),
            min_word_len: 1,
        }
    }
}

impl PosConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(AnalysisError::invalid("top_n must be positive"));
        }
        if self.batch_size == 0 {
            return Err(AnalysisError::invalid("tagging batch size must be positive"));
        }
        Ok(())
    }
}

/// Most frequent words of each class, in corpus-frequency order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosVocabulary {
    pub nouns: Vec<String>,
    pub adjectives: Vec<String>,
    pub verbs: Vec<String>,
}

impl PosVocabulary {
    pub fn get(&self, class: PosClass) -> &[String] {
        match class {
            PosClass::Noun => &self.nouns,
            PosClass::Adjective => &self.adjectives,
            PosClass::Verb => &self.verbs,
        }
    }

    fn get_mut(&mut self, class: PosClass) -> &mut Vec<String> {
        match class {
            PosClass::Noun => &mut self.nouns,
            PosClass::Adjective => &mut self.adjectives,
            PosClass::Verb => &mut self.verbs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nouns.is_empty() && self.adjectives.is_empty() && self.verbs.is_empty()
    }
}

/// Tags the table's vocabulary with `oracle` and collects the top words per class.
/// # Example
/// ```
/// use corpus_analysis::frequency::rank;
/// use corpus_analysis::pos::{classify, PosConfig, TagOracle};
/// use corpus_analysis::Result;
///
/// let words: Vec<String> = "dogs run dogs bark".split(' ').map(String::from).collect();
/// let oracle = |batch: &[String]| -> Result<Vec<(String, String)>> {
///     Ok(batch.iter().map(|w| (w.clone(), if w == "dogs" { "NNS" } else { "VBP" }.to_string())).collect())
/// };
/// let vocab = classify(&rank(&words), &oracle, &PosConfig::default()).unwrap();
/// assert_eq!(vocab.nouns, vec!["dogs"]);
/// assert_eq!(vocab.verbs, vec!["run", "bark"]);
/// ```
pub fn classify(
    table: &FrequencyTable,
    oracle: &dyn TagOracle,
    config: &PosConfig,
) -> Result<PosVocabulary> {
    config.validate()?;
    let words: Vec<String> = table.words().map(String::from).collect();
    let tags = tag_vocabulary(&words, oracle, config.batch_size)?;
    classify_tagged(table, &tags, config)
}

/// Collects the top words per class from an already tagged vocabulary.
/// Words without a tag are skipped.
pub fn classify_tagged(
    table: &FrequencyTable,
    tags: &TagMap,
    config: &PosConfig,
) -> Result<PosVocabulary> {
    config.validate()?;

    let mut vocab = PosVocabulary::default();
    for entry in table {
        let Some(class) = tags
            .get(&entry.word)
            .and_then(|tag| config.scheme.class_of(tag))
        else {
            continue;
        };
        if entry.word.chars().count() < config.min_word_len {
            continue;
        }
        let bucket = vocab.get_mut(class);
        if bucket.len() < config.top_n {
            bucket.push(entry.word.clone());
        }
        if [PosClass::Noun, PosClass::Adjective, PosClass::Verb]
            .iter()
            .all(|c| vocab.get(*c).len() >= config.top_n)
        {
            break;
        }
    }

    info!(
        "Class vocabularies: {} nouns, {} adjectives, {} verbs",
        vocab.nouns.len(),
        vocab.adjectives.len(),
        vocab.verbs.len()
    );
    Ok(vocab)
}

/// A corpus token with the class of its tag, if any.
///
/// [`crate::relations::extract`] decides membership from its vocabularies and
/// does not read `class`; the class is carried for consumers of the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub word: String,
    pub class: Option<PosClass>,
}

impl TaggedToken {
    pub fn new(word: impl Into<String>, class: Option<PosClass>) -> Self {
        Self {
            word: word.into(),
            class,
        }
    }
}

/// Attaches classes to the token stream, keeping token order.
pub fn tag_tokens(tokens: &[String], tags: &TagMap, scheme: &TagScheme) -> Vec<TaggedToken> {
    tokens
        .iter()
        .map(|word| TaggedToken {
            word: word.clone(),
            class: tags.get(word).and_then(|tag| scheme.class_of(tag)),
        })
        .collect()
}
