use tracing::info;

use crate::errors::AppError;
use crate::extract::Document;
use crate::llm_client::LlmGateway;
use crate::prompts::policy_qa_prompt;
use crate::session::SessionStore;
use crate::workflow::read_document_text;

/// Extracts every policy document and replaces the session's policy corpus with them.
///
/// Each document contributes `"\n--- <name> ---\n"` followed by its text. Uploads are
/// not additive: a second upload action discards the first. The session's question
/// set is left untouched. Returns the number of documents loaded.
pub async fn upload_policies(
    sessions: &dyn SessionStore,
    session_id: &str,
    documents: Vec<Document>,
) -> Result<usize, AppError> {
    if documents.is_empty() {
        return Err(AppError::validation("Upload at least one policy document"));
    }

    let count = documents.len();
    let mut combined = String::new();
    for document in documents {
        let name = document.name.clone();
        let text = read_document_text(document).await?;
        combined.push_str(&format!("\n--- {name} ---\n"));
        combined.push_str(&text);
    }

    let mut record = sessions.get(session_id).await.unwrap_or_default();
    record.policies = Some(combined);
    sessions.set(session_id, record).await;

    info!("Loaded {count} policy document(s) into session {session_id}");
    Ok(count)
}

/// Answers an employee question strictly from the session's policy corpus.
pub async fn ask_policy(
    gateway: &dyn LlmGateway,
    sessions: &dyn SessionStore,
    session_id: &str,
    question: &str,
) -> Result<String, AppError> {
    if question.trim().is_empty() {
        return Err(AppError::validation("Enter a question"));
    }

    let policies = sessions
        .get(session_id)
        .await
        .and_then(|record| record.policies)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("HR policy documents not available. Contact HR."))?;

    info!("Answering policy question for session {session_id}");
    let answer = gateway.complete(&policy_qa_prompt(&policies, question)).await?;
    Ok(answer)
}
