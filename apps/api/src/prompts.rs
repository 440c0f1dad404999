// Prompt Constructor: the four fixed LLM prompt templates and their builders.
// Builders are pure string interpolation. No retrieval, chunking or truncation:
// the full policy corpus is inlined regardless of size.

/// Sentence the policy assistant must emit when the answer is not in the supplied text.
pub const POLICY_NOT_SPECIFIED: &str = "Policy does not specify this.";

/// CV evaluation template. Placeholders: {cv_text}, {jd_text}
pub const CV_EVALUATION_TEMPLATE: &str = r#"You are a hiring expert.

Evaluate the CV and Job Description match.
Provide:
1. Eligibility percentage
2. Matching skills
3. Missing skills
4. Final recommendation

CV:
{cv_text}

Job Description:
{jd_text}"#;

/// Technical question generation template. Placeholders: {cv_text}, {jd_text}
pub const QUESTION_GENERATION_TEMPLATE: &str = r#"You are a technical interviewer.

Based on the candidate CV and the Job Description, generate up to 5 technical questions.
Questions should increase in difficulty from low to high.
Return questions numbered 1 to 5 in plain text.

Candidate CV:
{cv_text}

Job Description:
{jd_text}"#;

/// Answer grading template. Placeholders: {question}, {answer}
pub const ANSWER_GRADING_TEMPLATE: &str = r#"Evaluate the candidate's answer to the following technical question.
Provide a score from 0 to 20 and a short feedback.

Question:
{question}

Candidate Answer:
{answer}"#;

/// Policy Q&A template. Placeholders: {not_specified}, {policies}, {question}
pub const POLICY_QA_TEMPLATE: &str = r#"Answer ONLY using the HR policies below.
If info not present, say "{not_specified}"

POLICIES:
{policies}

QUESTION:
{question}"#;

pub fn cv_evaluation_prompt(cv_text: &str, jd_text: &str) -> String {
    fill(
        CV_EVALUATION_TEMPLATE,
        &[("cv_text", cv_text), ("jd_text", jd_text)],
    )
}

pub fn question_generation_prompt(cv_text: &str, jd_text: &str) -> String {
    fill(
        QUESTION_GENERATION_TEMPLATE,
        &[("cv_text", cv_text), ("jd_text", jd_text)],
    )
}

pub fn answer_grading_prompt(question: &str, answer: &str) -> String {
    fill(
        ANSWER_GRADING_TEMPLATE,
        &[("question", question), ("answer", answer)],
    )
}

pub fn policy_qa_prompt(policies: &str, question: &str) -> String {
    fill(
        POLICY_QA_TEMPLATE,
        &[
            ("not_specified", POLICY_NOT_SPECIFIED),
            ("policies", policies),
            ("question", question),
        ],
    )
}

/// Single-pass placeholder substitution. Braces inside substituted values are never
/// re-expanded, so a CV containing "{jd_text}" stays verbatim.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replaced = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, end))
        });
        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
