use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extract::Document;
use crate::llm_client::LlmGateway;
use crate::prompts::cv_evaluation_prompt;
use crate::scoring::SimilarityScorer;
use crate::workflow::read_document_text;

/// One ranked candidate. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub name: String,
    /// Lexical similarity to the JD, 0–100 with two decimals.
    pub score: f64,
    /// The model's free-text evaluation, verbatim.
    pub evaluation: String,
}

/// Scores and evaluates every CV against the JD, then ranks by score.
///
/// Per document: extract → score → prompt → gateway. Any failure aborts the batch
/// with no partial results. Ranking is a stable descending sort, so equal scores keep
/// upload order.
pub async fn evaluate_cvs(
    gateway: &dyn LlmGateway,
    scorer: &dyn SimilarityScorer,
    jd_text: &str,
    cvs: Vec<Document>,
) -> Result<Vec<EvaluationResult>, AppError> {
    if cvs.is_empty() || jd_text.trim().is_empty() {
        return Err(AppError::validation("Upload CVs and paste Job Description"));
    }

    info!("Evaluating {} CV(s)", cvs.len());

    let mut results = Vec::with_capacity(cvs.len());
    for cv in cvs {
        let name = cv.name.clone();
        let cv_text = read_document_text(cv).await?;

        let score = scorer.score(&cv_text, jd_text);
        debug!("{name}: similarity {score}");

        let evaluation = gateway.complete(&cv_evaluation_prompt(&cv_text, jd_text)).await?;

        results.push(EvaluationResult {
            name,
            score,
            evaluation,
        });
    }

    rank_by_score(&mut results);
    info!("CV evaluation complete ({} ranked)", results.len());
    Ok(results)
}

fn rank_by_score(results: &mut [EvaluationResult]) {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
