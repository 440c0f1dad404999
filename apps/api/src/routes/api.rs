//! Axum route handlers for the JSON API. Thin adapter: decode → workflow → encode.

use axum::{
    extract::{FromRequest, Path, State},
    http::StatusCode,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::Document;
use crate::session::DEFAULT_SESSION_ID;
use crate::state::AppState;
use crate::workflow::{self, EvaluationResult, GradingReport};

/// `Json` extractor whose rejections become `AppError::Validation`, keeping the
/// `{"error": ...}` body for malformed requests too.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// A browser upload: file name plus base64-encoded bytes.
#[derive(Debug, Deserialize)]
pub struct UploadedFile {
    #[serde(default = "unknown_file_name")]
    pub name: String,
    #[serde(default)]
    pub content: String,
}

fn unknown_file_name() -> String {
    "Unknown".to_string()
}

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

impl UploadedFile {
    pub fn into_document(self) -> Result<Document, AppError> {
        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = STANDARD
            .decode(compact)
            .map_err(|_| AppError::validation(format!("Error decoding file {}", self.name)))?;
        Ok(Document::new(self.name, bytes))
    }
}

fn decode_all(files: Vec<UploadedFile>) -> Result<Vec<Document>, AppError> {
    files.into_iter().map(UploadedFile::into_document).collect()
}

#[derive(Debug, Deserialize)]
pub struct EvaluateCvsRequest {
    #[serde(default)]
    pub jd_text: String,
    #[serde(default)]
    pub cv_files: Vec<UploadedFile>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateCvsResponse {
    pub results: Vec<EvaluationResult>,
}

#[derive(Debug, Deserialize)]
pub struct UploadPoliciesRequest {
    #[serde(default)]
    pub policy_files: Vec<UploadedFile>,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct UploadPoliciesResponse {
    pub success: bool,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub cv_file: Option<UploadedFile>,
    #[serde(default)]
    pub jd_text: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateAnswersRequest {
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub answers: Vec<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskPolicyRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct AskPolicyResponse {
    pub answer: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/evaluate-cvs
pub async fn handle_evaluate_cvs(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<EvaluateCvsRequest>,
) -> Result<Json<EvaluateCvsResponse>, AppError> {
    let cvs = decode_all(req.cv_files)?;
    let results = workflow::evaluate_cvs(
        state.gateway.as_ref(),
        state.scorer.as_ref(),
        &req.jd_text,
        cvs,
    )
    .await?;
    Ok(Json(EvaluateCvsResponse { results }))
}

/// POST /api/upload-policies
pub async fn handle_upload_policies(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UploadPoliciesRequest>,
) -> Result<Json<UploadPoliciesResponse>, AppError> {
    let documents = decode_all(req.policy_files)?;
    let count =
        workflow::upload_policies(state.sessions.as_ref(), &req.session_id, documents).await?;
    Ok(Json(UploadPoliciesResponse {
        success: true,
        count,
    }))
}

/// POST /api/generate-questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let cv = req.cv_file.map(UploadedFile::into_document).transpose()?;
    let questions = workflow::generate_questions(
        state.gateway.as_ref(),
        state.sessions.as_ref(),
        &req.session_id,
        cv,
        &req.jd_text,
    )
    .await?;
    Ok(Json(GenerateQuestionsResponse { questions }))
}

/// POST /api/evaluate-answers
pub async fn handle_evaluate_answers(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<EvaluateAnswersRequest>,
) -> Result<Json<GradingReport>, AppError> {
    let report = workflow::evaluate_answers(
        state.gateway.as_ref(),
        state.sessions.as_ref(),
        req.session_id.as_deref(),
        &req.questions,
        &req.answers,
    )
    .await?;
    Ok(Json(report))
}

/// POST /api/ask-policy
pub async fn handle_ask_policy(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AskPolicyRequest>,
) -> Result<Json<AskPolicyResponse>, AppError> {
    let answer = workflow::ask_policy(
        state.gateway.as_ref(),
        state.sessions.as_ref(),
        &req.session_id,
        &req.question,
    )
    .await?;
    Ok(Json(AskPolicyResponse { answer }))
}

/// DELETE /api/sessions/:session_id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> StatusCode {
    state.sessions.delete(&session_id).await;
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content: &str) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_decodes_base64_into_document() {
        let doc = upload("cv.txt", &STANDARD.encode("Rust engineer"))
            .into_document()
            .unwrap();
        assert_eq!(&doc.content[..], b"Rust engineer");
        assert_eq!(doc.name, "cv.txt");
    }

    #[test]
    fn test_wrapped_base64_is_accepted() {
        let encoded = STANDARD.encode("a fairly long line of CV text to wrap");
        let (head, tail) = encoded.split_at(12);
        let doc = upload("cv.txt", &format!("{head}\r\n{tail}")).into_document().unwrap();
        assert_eq!(&doc.content[..], b"a fairly long line of CV text to wrap");
    }

    #[test]
    fn test_bad_base64_names_the_file() {
        let err = upload("broken.pdf", "***not base64***").into_document().unwrap_err();
        assert_eq!(err.to_string(), "Error decoding file broken.pdf");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let req: AskPolicyRequest = serde_json::from_str(r#"{"question": "Leave?"}"#).unwrap();
        assert_eq!(req.session_id, "default");

        let file: UploadedFile = serde_json::from_str("{}").unwrap();
        assert_eq!(file.name, "Unknown");
        assert!(file.content.is_empty());
    }
}
