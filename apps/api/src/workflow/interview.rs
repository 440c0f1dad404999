//! Technical interview — question generation from a CV + JD, then per-answer grading.
//!
//! Known incompleteness: the grader asks the model for a 0–20 score per answer, but the
//! score is never read back from the response. `total_score` is the maximum possible
//! (`questions × 20`), not an achieved score.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::Document;
use crate::llm_client::LlmGateway;
use crate::prompts::{answer_grading_prompt, question_generation_prompt};
use crate::session::SessionStore;
use crate::workflow::read_document_text;

/// Maximum score per answer, as requested in the grading prompt.
pub const POINTS_PER_QUESTION: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingReport {
    /// `**Qi Evaluation:**` sections, one per answer, in question order.
    pub feedback: String,
    /// Maximum possible score (`questions × 20`).
    pub total_score: u32,
}

/// Generates technical questions for a CV against a JD and stores them on the session,
/// with an empty answer per question.
pub async fn generate_questions(
    gateway: &dyn LlmGateway,
    sessions: &dyn SessionStore,
    session_id: &str,
    cv: Option<Document>,
    jd_text: &str,
) -> Result<Vec<String>, AppError> {
    let cv = match cv {
        Some(cv) if !jd_text.trim().is_empty() => cv,
        _ => return Err(AppError::validation("Upload CV and paste Job Description")),
    };

    let cv_text = read_document_text(cv).await?;
    let response = gateway
        .complete(&question_generation_prompt(&cv_text, jd_text))
        .await?;

    let questions = parse_questions(&response);
    if questions.is_empty() {
        warn!("No enumerated questions found in model response for session {session_id}");
    }

    let mut record = sessions.get(session_id).await.unwrap_or_default();
    record.set_questions(questions.clone());
    sessions.set(session_id, record).await;

    info!("Generated {} question(s) for session {session_id}", questions.len());
    Ok(questions)
}

/// Keeps trimmed, non-empty lines that look like enumerated items: a leading digit or `Q`.
pub fn parse_questions(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| {
            line.chars()
                .next()
                .is_some_and(|c| c.is_numeric() || c == 'Q')
        })
        .map(String::from)
        .collect()
}

/// Grades each answer with one gateway call, in question order.
///
/// When `session_id` is given and that session holds exactly these questions, the
/// answers are stored on the session record.
pub async fn evaluate_answers(
    gateway: &dyn LlmGateway,
    sessions: &dyn SessionStore,
    session_id: Option<&str>,
    questions: &[String],
    answers: &[String],
) -> Result<GradingReport, AppError> {
    if questions.len() != answers.len() {
        return Err(AppError::validation("Questions and answers mismatch"));
    }
    if questions.is_empty() {
        return Err(AppError::validation("No questions to evaluate"));
    }

    let mut feedback = String::new();
    for (i, (question, answer)) in questions.iter().zip(answers).enumerate() {
        let result = gateway
            .complete(&answer_grading_prompt(question, answer))
            .await?;
        feedback.push_str(&format!("**Q{} Evaluation:**\n{result}\n\n", i + 1));
    }

    if let Some(session_id) = session_id {
        record_answers(sessions, session_id, questions, answers).await;
    }

    info!("Graded {} answer(s)", questions.len());
    Ok(GradingReport {
        feedback,
        total_score: questions.len() as u32 * POINTS_PER_QUESTION,
    })
}

async fn record_answers(
    sessions: &dyn SessionStore,
    session_id: &str,
    questions: &[String],
    answers: &[String],
) {
    let Some(mut record) = sessions.get(session_id).await else {
        return;
    };
    if record.questions != questions {
        return;
    }
    if record.set_answers(answers.to_vec()) {
        sessions.set(session_id, record).await;
    }
}
