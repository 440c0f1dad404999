//! Lexical similarity — TF-IDF cosine over a two-document corpus.
//!
//! `AppState` holds an `Arc<dyn SimilarityScorer>`; `TfIdfScorer` is the only backend.
//!
//! Algorithm (per call, no state carried between calls):
//! 1. Tokenize both texts: lowercase, `\b\w\w+\b` tokens, English stop words removed.
//! 2. Vocabulary = union of both token sets.
//! 3. idf(t) = ln((1 + n) / (1 + df(t))) + 1 with n = 2 (smoothed).
//! 4. Vector = raw term count × idf, then cosine between the two vectors.
//! 5. Scale to 0–100 and round to two decimals. Degenerate vectors score 0.0.

use std::collections::{BTreeSet, HashMap, HashSet};

use regex::Regex;

use crate::scoring::stop_words::ENGLISH_STOP_WORDS;

/// Pluggable lexical scorer. Implementations must be pure and symmetric.
pub trait SimilarityScorer: Send + Sync {
    /// Returns a 0.0–100.0 score rounded to two decimals.
    fn score(&self, a: &str, b: &str) -> f64;
}

pub struct TfIdfScorer {
    token_pattern: Regex,
    stop_words: HashSet<&'static str>,
}

impl Default for TfIdfScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfIdfScorer {
    pub fn new() -> Self {
        Self {
            token_pattern: Regex::new(r"\b\w\w+\b").expect("Invalid token regex"),
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
        }
    }

    fn term_counts(&self, text: &str) -> HashMap<String, f64> {
        let lower = text.to_lowercase();
        let mut counts = HashMap::new();
        for m in self.token_pattern.find_iter(&lower) {
            let token = m.as_str();
            if self.stop_words.contains(token) {
                continue;
            }
            *counts.entry(token.to_string()).or_insert(0.0) += 1.0;
        }
        counts
    }
}

impl SimilarityScorer for TfIdfScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        let counts_a = self.term_counts(a);
        let counts_b = self.term_counts(b);

        if counts_a.is_empty() || counts_b.is_empty() {
            return 0.0;
        }

        // Sorted vocabulary keeps float summation order fixed, so score(a, b) == score(b, a).
        let vocabulary: BTreeSet<&String> = counts_a.keys().chain(counts_b.keys()).collect();

        let n_docs = 2.0_f64;
        let mut dot = 0.0_f64;
        let mut norm_a = 0.0_f64;
        let mut norm_b = 0.0_f64;

        for term in vocabulary {
            let tf_a = counts_a.get(term).copied().unwrap_or(0.0);
            let tf_b = counts_b.get(term).copied().unwrap_or(0.0);
            let df = (tf_a > 0.0) as u8 as f64 + (tf_b > 0.0) as u8 as f64;
            let idf = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;

            let wa = tf_a * idf;
            let wb = tf_b * idf;
            dot += wa * wb;
            norm_a += wa * wa;
            norm_b += wb * wb;
        }

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        let cosine = (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0);
        round_two_decimals(cosine * 100.0)
    }
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
