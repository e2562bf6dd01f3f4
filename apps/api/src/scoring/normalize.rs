//! Text normalization — the canonical token stream every scoring step reads.
//!
//! Pipeline: case-fold → punctuation to spaces → tokenize → drop stop-words
//! → lemmatize → drop tokens of length ≤ 2.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::scoring::lemmatizer::lemmatize_noun;
use crate::scoring::stopwords::ENGLISH_STOP_WORDS;

/// Tokens of this length or shorter are discarded.
const MAX_DISCARDED_TOKEN_LEN: usize = 2;

/// Language capability the normalizer depends on. Implement this to swap the
/// bundled English tables for another vocabulary or an external service.
pub trait TextAnalyzer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
    fn is_stop_word(&self, token: &str) -> bool;
    fn lemmatize(&self, token: &str) -> String;
}

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Bundled English analyzer: whitespace tokenizer, standard stop-word list,
/// noun lemmatizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishAnalyzer;

impl TextAnalyzer for EnglishAnalyzer {
    /// Input has already had punctuation replaced by spaces, so splitting on
    /// whitespace is sufficient.
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn is_stop_word(&self, token: &str) -> bool {
        STOP_WORD_SET.contains(token)
    }

    fn lemmatize(&self, token: &str) -> String {
        lemmatize_noun(token)
    }
}

/// Normalized form of a text: the token sequence and its space-joined string.
///
/// Every token is lowercase ASCII alphanumeric, longer than two characters,
/// not a stop-word, and lemmatized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    tokens: Vec<String>,
    joined: String,
}

impl NormalizedText {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn as_str(&self) -> &str {
        &self.joined
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Replaces every character outside `[a-z0-9 ]` (after lowercasing) with a space.
pub fn strip_to_alphanumeric(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

pub fn normalize(text: &str, analyzer: &dyn TextAnalyzer) -> NormalizedText {
    let cleaned = strip_to_alphanumeric(text);

    let tokens: Vec<String> = analyzer
        .tokenize(&cleaned)
        .into_iter()
        .filter(|t| !analyzer.is_stop_word(t))
        .map(|t| analyzer.lemmatize(&t))
        .filter(|t| t.len() > MAX_DISCARDED_TOKEN_LEN)
        .collect();

    let joined = tokens.join(" ");
    NormalizedText { tokens, joined }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(text: &str) -> NormalizedText {
        normalize(text, &EnglishAnalyzer)
    }

    #[test]
    fn test_punctuation_becomes_separator() {
        let n = norm("Python/SQL, NLP-pipelines; C++!");
        assert_eq!(n.tokens(), &["python", "sql", "nlp", "pipeline"]);
        assert_eq!(n.as_str(), "python sql nlp pipeline");
    }

    #[test]
    fn test_stop_words_and_short_tokens_removed() {
        let n = norm("I am the lead of an ML team at a startup");
        assert_eq!(n.as_str(), "lead team startup");
    }

    #[test]
    fn test_lemmatizes_plurals() {
        let n = norm("Built data pipelines and REST services for companies");
        assert_eq!(n.as_str(), "built data pipeline rest service company");
    }

    #[test]
    fn test_numbers_survive_when_long_enough() {
        let n = norm("Shipped 5 releases in 2023");
        assert_eq!(n.tokens(), &["shipped", "release", "2023"]);
    }

    #[test]
    fn test_non_ascii_letters_are_separators() {
        let n = norm("Résumé naïve café");
        assert_eq!(n.as_str(), "sum caf");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(norm("").is_empty());
        assert!(norm("  \n\t ").is_empty());
        assert_eq!(norm("").as_str(), "");
    }

    #[test]
    fn test_deterministic() {
        let text = "Senior backend engineer: Rust, Go, distributed systems (5 years).";
        assert_eq!(norm(text), norm(text));
    }

    #[test]
    fn test_invariant_every_token_is_clean() {
        let n = norm("The Quick-Brown FOX jumps over 3 lazy dogs; e-mail: fox@example.com!");
        for token in n.tokens() {
            assert!(token.len() > 2, "{token} too short");
            assert!(
                token
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "{token} not alphanumeric"
            );
            assert!(!EnglishAnalyzer.is_stop_word(token));
        }
    }
}
