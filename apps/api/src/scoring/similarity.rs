//! Pairwise TF-IDF cosine similarity over unigrams and bigrams.
//!
//! The two input documents form the whole corpus: vocabulary and IDF weights
//! come from this pair only. IDF is smoothed, `ln((1 + n) / (1 + df)) + 1`,
//! and each row is L2-normalized, so the cosine is a plain dot product.

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens are runs of two or more word characters.
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Semantic-fit capability. Implement this to replace the bundled TF-IDF
/// vectorizer with an embedding model or a remote service.
pub trait SimilarityScorer: Send + Sync {
    /// Returns a similarity in `[0, 1]`; 0 when either side has no vocabulary.
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// TF-IDF vectorizer with an inclusive n-gram range, scored by cosine.
#[derive(Debug, Clone, Copy)]
pub struct TfIdfCosine {
    pub min_n: usize,
    pub max_n: usize,
}

impl Default for TfIdfCosine {
    fn default() -> Self {
        Self { min_n: 1, max_n: 2 }
    }
}

impl TfIdfCosine {
    fn term_counts(&self, text: &str) -> HashMap<String, f64> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = TOKEN_PATTERN
            .find_iter(&lower)
            .map(|m| m.as_str())
            .collect();

        let mut counts = HashMap::new();
        for n in self.min_n.max(1)..=self.max_n {
            if words.len() < n {
                break;
            }
            for gram in words.windows(n) {
                *counts.entry(gram.join(" ")).or_insert(0.0) += 1.0;
            }
        }
        counts
    }
}

impl SimilarityScorer for TfIdfCosine {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let docs = [self.term_counts(a), self.term_counts(b)];
        if docs.iter().any(HashMap::is_empty) {
            return 0.0;
        }

        // Document frequency over the two-document corpus
        let n_docs = docs.len() as f64;
        let mut df: BTreeMap<&str, f64> = BTreeMap::new();
        for doc in &docs {
            let unique: HashSet<&str> = doc.keys().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0.0) += 1.0;
            }
        }
        let idf: HashMap<&str, f64> = df
            .into_iter()
            .map(|(term, freq)| (term, ((1.0 + n_docs) / (1.0 + freq)).ln() + 1.0))
            .collect();

        let vectors: Vec<HashMap<&str, f64>> = docs
            .iter()
            .map(|doc| {
                let weighted: HashMap<&str, f64> = doc
                    .iter()
                    .map(|(term, tf)| (term.as_str(), tf * idf[term.as_str()]))
                    .collect();
                l2_normalize(weighted)
            })
            .collect();

        let dot: f64 = vectors[0]
            .iter()
            .filter_map(|(term, w)| vectors[1].get(term).map(|v| w * v))
            .sum();

        dot.clamp(0.0, 1.0)
    }
}

fn l2_normalize(mut vector: HashMap<&str, f64>) -> HashMap<&str, f64> {
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for w in vector.values_mut() {
            *w /= norm;
        }
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(a: &str, b: &str) -> f64 {
        TfIdfCosine::default().similarity(a, b)
    }

    #[test]
    fn test_empty_side_is_zero() {
        assert_eq!(sim("", "python developer"), 0.0);
        assert_eq!(sim("python developer", ""), 0.0);
        assert_eq!(sim("", ""), 0.0);
    }

    #[test]
    fn test_single_character_tokens_have_no_vocabulary() {
        assert_eq!(sim("x", "x y z"), 0.0);
    }

    #[test]
    fn test_self_similarity_is_maximal() {
        let text = "python developer sql nlp experience year";
        let s = sim(text, text);
        assert!((s - 1.0).abs() < 1e-9, "self similarity was {s}");
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        assert_eq!(sim("python sql", "carpentry woodwork"), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = "python developer sql nlp";
        let b = "senior python engineer sql pipeline";
        assert!((sim(a, b) - sim(b, a)).abs() < 1e-12);
    }

    #[test]
    fn test_partial_overlap_is_between_zero_and_one() {
        let s = sim("python developer sql", "python engineer kafka");
        assert!(s > 0.0 && s < 1.0, "similarity was {s}");
    }

    #[test]
    fn test_shared_bigram_raises_similarity() {
        let job = "machine learning engineer";
        let with_phrase = sim(job, "machine learning research");
        let words_apart = sim(job, "learning machine research");
        assert!(with_phrase > words_apart);
    }

    #[test]
    fn test_known_value_single_shared_term() {
        // Vocabulary {a1, b1, a1 b1} vs {a1, c1, a1 c1}: only "a1" shared.
        // idf(shared) = 1, idf(unique) = ln(3/2) + 1.
        let unique = (1.5_f64).ln() + 1.0;
        let expected = 1.0 / (1.0 + 2.0 * unique * unique);
        let s = sim("a1 b1", "a1 c1");
        assert!((s - expected).abs() < 1e-9, "expected {expected}, got {s}");
    }

    #[test]
    fn test_unigram_only_configuration() {
        let scorer = TfIdfCosine { min_n: 1, max_n: 1 };
        let s = scorer.similarity("learning machine", "machine learning");
        assert!((s - 1.0).abs() < 1e-9);
    }
}
