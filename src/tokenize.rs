//! Word tokenization with a hard token cap.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default hard cap on the number of tokens kept from a corpus.
pub const DEFAULT_MAX_TOKENS: usize = 100_000;

/// Single-letter words that survive the length filter by default.
pub const DEFAULT_SINGLE_LETTER_WORDS: [&str; 2] = ["i", "a"];

// Both cases are spelled out so match offsets index the raw text; matches are
// lowercased afterwards.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[a-zA-ZąćęłńóśźżĄĆĘŁŃÓŚŹŻ]+\b").expect("word pattern is valid")
});

/// Tokenizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Only the first `max_tokens` tokens (in text order) are kept.
    pub max_tokens: usize,
    /// Words of a single letter that are kept, all other one-letter runs are dropped.
    pub single_letter_words: Vec<String>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            single_letter_words: DEFAULT_SINGLE_LETTER_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

/// Tokens plus how much of the raw text produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenized {
    pub tokens: Vec<String>,
    /// Byte offset just past the last kept token, or the text length when the
    /// cap was not reached.
    pub extent: usize,
    /// Whether the cap cut off further tokens.
    pub truncated: bool,
}

/// Splits raw text into lowercase words.
/// A word is a maximal run of Latin or Polish letters that does not touch any other word character.
/// Single-letter runs are dropped unless allow-listed, and only the first `max_tokens` words are kept.
/// # Example
/// ```
/// use corpus_analysis::tokenize::{tokenize, TokenizerConfig};
/// let tokens = tokenize("Ala ma kota, a kot ma x.", &TokenizerConfig::default());
/// assert_eq!(tokens, vec!["ala", "ma", "kota", "a", "kot", "ma"]);
/// ```
pub fn tokenize(text: &str, config: &TokenizerConfig) -> Vec<String> {
    tokenize_with_extent(text, config).tokens
}

/// Same as [`tokenize`], also reporting the byte extent of `text` the tokens came from.
pub fn tokenize_with_extent(text: &str, config: &TokenizerConfig) -> Tokenized {
    let mut tokens = Vec::new();
    let mut extent = text.len();
    let mut truncated = false;

    for m in WORD_RE.find_iter(text) {
        let word = m.as_str().to_lowercase();
        if word.chars().count() < 2 && !config.single_letter_words.contains(&word) {
            continue;
        }
        if tokens.len() == config.max_tokens {
            truncated = true;
            break;
        }
        tokens.push(word);
        extent = m.end();
    }

    if !truncated {
        extent = text.len();
    } else if tokens.is_empty() {
        extent = 0;
    }

    Tokenized {
        tokens,
        extent,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(max_tokens: usize) -> TokenizerConfig {
        TokenizerConfig {
            max_tokens,
            ..TokenizerConfig::default()
        }
    }

    #[test]
    fn lowercases_and_keeps_polish_letters() {
        let tokens = tokenize("Żółć ŁĄKA, Gęś!", &cfg(100));
        assert_eq!(tokens, vec!["żółć", "łąka", "gęś"]);
    }

    #[test]
    fn runs_touching_digits_or_other_letters_are_not_words() {
        // "abc1" and "café" contain word characters outside the letter set
        let tokens = tokenize("abc1 café plain under_score", &cfg(100));
        assert_eq!(tokens, vec!["plain"]);
    }

    #[test]
    fn case_folding_lookalikes_are_not_letters() {
        // long s (U+017F) and the Kelvin sign (U+212A) fold to s and k
        let tokens = tokenize("\u{17F}top \u{212A}ing plain", &cfg(100));
        assert_eq!(tokens, vec!["plain"]);
    }

    #[test]
    fn single_letters_follow_the_allow_list() {
        let tokens = tokenize("a b i x I", &cfg(100));
        assert_eq!(tokens, vec!["a", "i", "i"]);

        let custom = TokenizerConfig {
            max_tokens: 100,
            single_letter_words: vec!["x".to_string()],
        };
        assert_eq!(tokenize("a b i x", &custom), vec!["x"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let t = tokenize_with_extent("", &cfg(10));
        assert!(t.tokens.is_empty());
        assert_eq!(t.extent, 0);
        assert!(!t.truncated);
        assert!(tokenize("123 ... !!!", &cfg(10)).is_empty());
    }

    #[test]
    fn cap_keeps_a_prefix_and_reports_extent() {
        let text = "one two three four";
        let t = tokenize_with_extent(text, &cfg(2));
        assert_eq!(t.tokens, vec!["one", "two"]);
        assert!(t.truncated);
        assert_eq!(&text[..t.extent], "one two");

        let full = tokenize_with_extent(text, &cfg(4));
        assert!(!full.truncated);
        assert_eq!(full.extent, text.len());
    }

    #[test]
    fn zero_cap_keeps_nothing() {
        let t = tokenize_with_extent("alpha beta", &cfg(0));
        assert!(t.tokens.is_empty());
        assert!(t.truncated);
        assert_eq!(t.extent, 0);
    }
}
