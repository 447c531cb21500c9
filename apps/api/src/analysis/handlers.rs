//! The analysis endpoint: multipart intake and the three-stage pipeline
//! (resolve texts, score, narrate) with two early-exit branches.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::extract::extract_text;
use crate::analysis::report::{ReportGenerator, REPORT_FALLBACK};
use crate::analysis::scoring::MatchScorer;
use crate::errors::AppError;
use crate::state::AppState;

// Early-exit messages. User-facing, so localized like the rest of the
// response surface.
const MSG_RESUME_UNREADABLE: &str =
    "Não foi possível extrair texto do currículo. Verifique se o PDF não é uma imagem escaneada.";
const MSG_JOB_MISSING: &str = "Descrição da vaga ausente. Envie o texto ou o arquivo da vaga.";

/// Multipart fields of one analysis request. A missing `file` field stays
/// as empty bytes and flows through the same empty-extraction early exit.
#[derive(Debug, Default)]
pub struct AnalysisInput {
    pub resume: Bytes,
    pub job_description: Option<String>,
    pub job_file: Option<Bytes>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub nota: f64,
    pub feedback: String,
}

/// POST /analisar
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let input = collect_input(multipart).await?;

    let resume_text = extract_text(&input.resume);
    let job_text = resolve_job_text(&input);

    let response = run_pipeline(
        &resume_text,
        job_text.as_deref(),
        state.scorer.as_ref(),
        state.reporter.as_ref(),
    )
    .await?;
    Ok(Json(response))
}

/// Collects the known multipart fields; unknown fields are drained and
/// ignored. A malformed body is the one case that surfaces as a 400.
async fn collect_input(mut multipart: Multipart) -> Result<AnalysisInput, AppError> {
    let mut input = AnalysisInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                input.resume = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid 'file' field: {e}")))?;
            }
            "jobDescription" => {
                input.job_description = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Invalid 'jobDescription' field: {e}"))
                })?);
            }
            // Legacy alias kept for older frontends.
            "vaga" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid 'vaga' field: {e}")))?;
                if input.job_description.is_none() {
                    input.job_description = Some(text);
                }
            }
            "jobFile" => {
                input.job_file = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Invalid 'jobFile' field: {e}"))
                })?);
            }
            _ => {
                let _ = field.bytes().await;
            }
        }
    }

    Ok(input)
}

/// Resolves the job-description text. An uploaded document takes precedence
/// over the raw text field; an empty extraction falls back to the text, so
/// either channel can satisfy the requirement on its own.
fn resolve_job_text(input: &AnalysisInput) -> Option<String> {
    if let Some(doc) = &input.job_file {
        let text = extract_text(doc);
        if !text.trim().is_empty() {
            return Some(text);
        }
        warn!("job file yielded no text, falling back to the raw text field");
    }

    input
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// The pipeline proper, on already-extracted texts.
///
/// Business failures (missing resume or job text) degrade to a normal
/// response with a zero score. A generation failure degrades to the fixed
/// fallback narrative while keeping the real score. Only transport faults
/// (embeddings, malformed multipart) escape as errors.
pub(crate) async fn run_pipeline(
    resume_text: &str,
    job_text: Option<&str>,
    scorer: &dyn MatchScorer,
    reporter: &dyn ReportGenerator,
) -> Result<AnalysisResponse, AppError> {
    if resume_text.trim().is_empty() {
        info!("analysis rejected: resume text empty after extraction");
        return Ok(AnalysisResponse {
            nota: 0.0,
            feedback: MSG_RESUME_UNREADABLE.to_string(),
        });
    }

    let Some(job_text) = job_text.map(str::trim).filter(|t| !t.is_empty()) else {
        info!("analysis rejected: no job description in either channel");
        return Ok(AnalysisResponse {
            nota: 0.0,
            feedback: MSG_JOB_MISSING.to_string(),
        });
    };

    let nota = scorer.score(resume_text, job_text).await?;
    info!(nota, "match score computed");

    let feedback = match reporter.generate(resume_text, job_text).await {
        Ok(text) => text,
        Err(e) => {
            warn!("report generation failed, degrading to fallback: {e}");
            REPORT_FALLBACK.to_string()
        }
    };

    Ok(AnalysisResponse { nota, feedback })
}
