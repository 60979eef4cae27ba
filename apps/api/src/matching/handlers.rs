//! Axum route handlers for the matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::extract::JsonObject;
use crate::extraction::extract_text;
use crate::llm_client::TextGenerator;
use crate::matching::criteria::{get_adapted_evaluation_criteria, Criterion};
use crate::matching::job_matcher::calculate_match;
use crate::matching::resume_parser::parse_resume;
use crate::matching::response::{attach_job_id, format_response, job_id_text};
use crate::matching::role_evaluator::{adapt_evaluation, determine_role_type};
use crate::state::AppState;

const DEFAULT_RESUME_TYPE: &str = "txt";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    /// Plain text, or base64 of the document for pdf/docx.
    pub resume: String,
    pub resume_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume: String,
    pub resume_type: Option<String>,
    pub job_description: Value,
    /// String or number; see `job_id_text`.
    #[serde(default)]
    pub job_id: Value,
    pub company_info: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRoleRequest {
    pub job_description: Value,
}

#[derive(Debug, Serialize)]
pub struct EvaluateRoleResponse {
    pub role_type: String,
    pub confidence: f64,
    pub justification: String,
    pub adapted_criteria: Vec<Criterion>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/parse-resume
///
/// Extracts the resume text and returns the model's structured ParsedResume.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    body: JsonObject,
) -> Result<Json<Value>, AppError> {
    let request: ParseResumeRequest = body.into_request(&["resume"])?;
    let resume_type = request.resume_type.as_deref().unwrap_or(DEFAULT_RESUME_TYPE);

    let parsed = extract_and_parse(&request.resume, resume_type, state.llm.as_ref()).await?;

    Ok(Json(parsed))
}

/// POST /api/v1/match
///
/// Full pipeline: extract → parse → weighted match → role adaptation → wrap.
/// Model failures surface as fallback payloads inside a 200, never as errors.
pub async fn handle_match(
    State(state): State<AppState>,
    body: JsonObject,
) -> Result<Json<Value>, AppError> {
    let request: MatchRequest = body.into_request(&["resume", "job_description"])?;
    let resume_type = request.resume_type.as_deref().unwrap_or(DEFAULT_RESUME_TYPE);
    let llm = state.llm.as_ref();

    let parsed_resume = extract_and_parse(&request.resume, resume_type, llm).await?;

    info!("Calculating match score using standardized criteria");
    let standard = calculate_match(
        &parsed_resume,
        &request.job_description,
        request.company_info.as_ref(),
        llm,
    )
    .await;
    info!(fallback = standard.is_fallback(), "Match scoring finished");

    info!("Applying role-specific adaptations to evaluation");
    let adapted = adapt_evaluation(&request.job_description, standard.into_value(), llm).await;
    info!(fallback = adapted.is_fallback(), "Role adaptation finished");

    let mut response = format_response(adapted.into_value());
    if let Some(job_id) = job_id_text(&request.job_id) {
        attach_job_id(&mut response, &job_id);
    }

    Ok(Json(response))
}

/// POST /api/v1/evaluate-role
///
/// Classifies the role and returns its criteria weighting. No insights, no scores.
pub async fn handle_evaluate_role(
    State(state): State<AppState>,
    body: JsonObject,
) -> Result<Json<EvaluateRoleResponse>, AppError> {
    let request: EvaluateRoleRequest = body.into_request(&["job_description"])?;

    let role = determine_role_type(&request.job_description, state.llm.as_ref())
        .await
        .into_value();
    let adapted_criteria = get_adapted_evaluation_criteria(&role.role_type).to_vec();

    Ok(Json(EvaluateRoleResponse {
        role_type: role.role_type,
        confidence: role.confidence,
        justification: role.justification,
        adapted_criteria,
    }))
}

/// Extraction errors propagate; the parsing stage itself cannot fail.
async fn extract_and_parse(
    resume: &str,
    resume_type: &str,
    llm: &dyn TextGenerator,
) -> Result<Value, AppError> {
    info!(resume_type, "Processing resume");
    let resume_text = extract_text(resume, resume_type).await?;
    let parsed = parse_resume(&resume_text, llm).await;
    info!(fallback = parsed.is_fallback(), "Resume parsing finished");
    Ok(parsed.into_value())
}
