//! Narrative report generation via the LLM collaborator.

use async_trait::async_trait;

use crate::analysis::prompts::REPORT_SYSTEM;
use crate::analysis::scoring::truncate_chars;
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};

/// Resume text cap inside the report prompt.
pub const REPORT_RESUME_MAX_CHARS: usize = 6_000;
/// Job description cap. Smaller than the resume cap: postings carry less
/// signal per character than a career history.
pub const REPORT_JOB_MAX_CHARS: usize = 3_000;

// Generation parameters, kept low for report consistency.
const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 850;

/// Returned in place of the narrative when the generation collaborator
/// fails. The request itself still succeeds with the real score.
pub const REPORT_FALLBACK: &str = "Erro ao processar análise.";

/// The report generator trait. `AppState` carries it as
/// `Arc<dyn ReportGenerator>` so orchestration tests can substitute mocks.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// Returns the generated narrative verbatim; the structure of the text
    /// is never parsed or validated here or downstream.
    async fn generate(&self, resume_text: &str, job_text: &str) -> Result<String, AppError>;
}

/// Generator backed by the LLM client.
pub struct LlmReportGenerator {
    llm: LlmClient,
}

impl LlmReportGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ReportGenerator for LlmReportGenerator {
    async fn generate(&self, resume_text: &str, job_text: &str) -> Result<String, AppError> {
        let prompt = build_user_prompt(resume_text, job_text);
        let response = self
            .llm
            .call(&prompt, REPORT_SYSTEM, TEMPERATURE, MAX_TOKENS)
            .await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(text.to_string())
    }
}

/// Builds the user message with both texts truncated to their caps.
pub fn build_user_prompt(resume_text: &str, job_text: &str) -> String {
    format!(
        "CV: {} \n VAGA: {}",
        truncate_chars(resume_text, REPORT_RESUME_MAX_CHARS),
        truncate_chars(job_text, REPORT_JOB_MAX_CHARS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_both_texts() {
        let prompt = build_user_prompt("Python, FastAPI, 5 anos", "Python, FastAPI, 3 anos");
        assert!(prompt.contains("CV: Python, FastAPI, 5 anos"));
        assert!(prompt.contains("VAGA: Python, FastAPI, 3 anos"));
    }

    #[test]
    fn test_prompt_applies_independent_caps() {
        let long_resume = "r".repeat(REPORT_RESUME_MAX_CHARS + 500);
        let long_job = "j".repeat(REPORT_JOB_MAX_CHARS + 500);
        let prompt = build_user_prompt(&long_resume, &long_job);

        let resume_part = prompt
            .split(" \n VAGA: ")
            .next()
            .unwrap()
            .strip_prefix("CV: ")
            .unwrap();
        let job_part = prompt.split(" \n VAGA: ").nth(1).unwrap();
        assert_eq!(resume_part.chars().count(), REPORT_RESUME_MAX_CHARS);
        assert_eq!(job_part.chars().count(), REPORT_JOB_MAX_CHARS);
    }

    #[test]
    fn test_resume_cap_exceeds_job_cap() {
        assert!(REPORT_RESUME_MAX_CHARS > REPORT_JOB_MAX_CHARS);
    }

    #[test]
    fn test_system_prompt_carries_mandatory_sections() {
        assert!(REPORT_SYSTEM.contains("Resumo da Trajetória"));
        assert!(REPORT_SYSTEM.contains("Análise de Gaps"));
        assert!(REPORT_SYSTEM.contains("Pontos de Investigação"));
    }
}
