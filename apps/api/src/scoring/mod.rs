// Lexical Similarity Scorer: TF-IDF cosine between a candidate document and a job description.
// Pure and synchronous; no LLM involvement.

pub mod similarity;
pub mod stop_words;

pub use similarity::{SimilarityScorer, TfIdfScorer};
