//! Terminal adapter — the same workflows as the HTTP API, driven from local files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use uuid::Uuid;

use crate::extract::Document;
use crate::state::AppState;
use crate::workflow::{self, interview::POINTS_PER_QUESTION};

#[derive(Parser)]
#[command(name = "hr-api")]
#[command(about = "HR workflow service: CV ranking, technical interviews and policy Q&A")]
#[command(version)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API and web UI
    Serve,

    /// Rank CVs against a job description
    Evaluate {
        /// Path to the job description (plain text)
        #[arg(short, long)]
        jd: PathBuf,

        /// CV files (PDF, DOCX or text)
        #[arg(required = true)]
        cvs: Vec<PathBuf>,
    },

    /// Generate technical questions for a CV, answer them on stdin, then grade the answers
    Interview {
        /// Path to the job description (plain text)
        #[arg(short, long)]
        jd: PathBuf,

        /// Candidate CV (PDF, DOCX or text)
        #[arg(short, long)]
        cv: PathBuf,
    },

    /// Ask one question against a set of policy documents
    Ask {
        /// Policy document (repeatable)
        #[arg(short, long = "policy", required = true)]
        policies: Vec<PathBuf>,

        /// The question to ask
        question: String,
    },
}

/// Reads a file into a `Document`, named after its file name.
pub async fn load_document(path: &Path) -> Result<Document> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Document::new(name, bytes))
}

async fn load_documents(paths: &[PathBuf]) -> Result<Vec<Document>> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        documents.push(load_document(path).await?);
    }
    Ok(documents)
}

async fn read_jd(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read job description {}", path.display()))
}

pub async fn run_evaluate(state: &AppState, jd: &Path, cvs: &[PathBuf]) -> Result<()> {
    let jd_text = read_jd(jd).await?;
    let documents = load_documents(cvs).await?;

    let results = workflow::evaluate_cvs(
        state.gateway.as_ref(),
        state.scorer.as_ref(),
        &jd_text,
        documents,
    )
    .await?;

    for (i, result) in results.iter().enumerate() {
        println!("Rank {}: {} ({}%)", i + 1, result.name, result.score);
        println!("{}\n", result.evaluation);
    }
    Ok(())
}

pub async fn run_interview(state: &AppState, jd: &Path, cv: &Path) -> Result<()> {
    let jd_text = read_jd(jd).await?;
    let document = load_document(cv).await?;
    let session_id = Uuid::new_v4().to_string();

    let questions = workflow::generate_questions(
        state.gateway.as_ref(),
        state.sessions.as_ref(),
        &session_id,
        Some(document),
        &jd_text,
    )
    .await?;

    if questions.is_empty() {
        anyhow::bail!("The model returned no numbered questions");
    }

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let answers = read_answers(&questions, &mut stdin, &mut stdout).await?;

    let report = workflow::evaluate_answers(
        state.gateway.as_ref(),
        state.sessions.as_ref(),
        Some(&session_id),
        &questions,
        &answers,
    )
    .await?;

    println!("{}", report.feedback);
    println!(
        "Overall Score (approximate): {} / {}",
        report.total_score,
        questions.len() as u32 * POINTS_PER_QUESTION
    );
    Ok(())
}

/// Prints each question and reads one line of answer for it. EOF yields empty answers.
async fn read_answers<R, W>(questions: &[String], input: &mut R, output: &mut W) -> Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut answers = Vec::with_capacity(questions.len());
    for (i, question) in questions.iter().enumerate() {
        output
            .write_all(format!("Q{}: {question}\nAnswer for Q{}: ", i + 1, i + 1).as_bytes())
            .await?;
        output.flush().await?;

        let mut line = String::new();
        input.read_line(&mut line).await?;
        answers.push(line.trim_end_matches(['\r', '\n']).to_string());
    }
    Ok(answers)
}

pub async fn run_ask(state: &AppState, policies: &[PathBuf], question: &str) -> Result<()> {
    let session_id = Uuid::new_v4().to_string();
    let documents = load_documents(policies).await?;

    workflow::upload_policies(state.sessions.as_ref(), &session_id, documents).await?;
    let answer = workflow::ask_policy(
        state.gateway.as_ref(),
        state.sessions.as_ref(),
        &session_id,
        question,
    )
    .await?;

    println!("{answer}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use super::*;
    use crate::extract::DocumentKind;
    use crate::llm_client::stub::StubGateway;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["hr-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_ask_collects_repeated_policies() {
        let cli = Cli::try_parse_from([
            "hr-api", "ask", "--policy", "a.pdf", "-p", "b.docx", "How much leave?",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Ask { policies, question }) => {
                assert_eq!(policies.len(), 2);
                assert_eq!(question, "How much leave?");
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_evaluate_requires_a_cv() {
        assert!(Cli::try_parse_from(["hr-api", "evaluate", "--jd", "jd.txt"]).is_err());
    }

    #[tokio::test]
    async fn test_load_document_uses_file_name_and_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Candidate.TXT");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"Rust engineer")
            .unwrap();

        let doc = load_document(&path).await.unwrap();
        assert_eq!(doc.name, "Candidate.TXT");
        assert_eq!(doc.kind, DocumentKind::PlainText);
        assert_eq!(&doc.content[..], b"Rust engineer");
    }

    #[tokio::test]
    async fn test_load_missing_file_names_path() {
        let err = load_document(Path::new("/nonexistent/cv.pdf")).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/cv.pdf"));
    }

    #[tokio::test]
    async fn test_read_answers_one_line_per_question() {
        let questions = vec!["1. a".to_string(), "2. b".to_string(), "3. c".to_string()];
        let mut input: &[u8] = b"first answer\r\nsecond\n";
        let mut output = Vec::new();

        let answers = read_answers(&questions, &mut input, &mut output).await.unwrap();

        assert_eq!(answers, vec!["first answer", "second", ""]);
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Q3: 3. c\nAnswer for Q3: "));
    }

    #[tokio::test]
    async fn test_run_ask_uses_policy_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leave.txt");
        std::fs::write(&path, "Annual leave is 25 days.").unwrap();

        let gateway = Arc::new(StubGateway::canned("25 days"));
        let state = AppState::for_tests(gateway.clone());
        run_ask(&state, &[path], "How much leave?").await.unwrap();

        let prompt = &gateway.prompts()[0];
        assert!(prompt.contains("--- leave.txt ---\nAnnual leave is 25 days."));
        assert!(prompt.ends_with("How much leave?"));
    }
}
