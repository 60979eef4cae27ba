//! Job matcher: weighted match scoring of a parsed resume against a job description.
//!
//! The model scores; this module rescales the 0–100 score to 0.0–1.0 and
//! substitutes a neutral payload when the model cannot be used.

use serde_json::{json, Map, Value};

use crate::llm_client::{ask_json, LlmError, TextGenerator};
use crate::matching::criteria::{FitBand, SKILLS_DIMENSION_KEY, STANDARD_DIMENSIONS};
use crate::matching::fallback::StageOutput;
use crate::matching::prompts::build_match_prompt;

/// Canonical score used when the model reply carries no `score`.
const DEFAULT_SCORE: f64 = 0.5;
const FALLBACK_RAW_SCORE: u32 = 50;
const FALLBACK_CRITERION_SCORE: u32 = 5;
pub const FALLBACK_ANALYSIS: &str = "Error in processing";
const FALLBACK_RED_FLAG: &str = "Error processing candidate data";

/// Scores a parsed resume against a job description. Never fails: on any
/// error the neutral 0.5 / 50 payload comes back instead.
pub async fn calculate_match(
    parsed_resume: &Value,
    job_description: &Value,
    company_info: Option<&Value>,
    llm: &dyn TextGenerator,
) -> StageOutput<Value> {
    let prompt = build_match_prompt(parsed_resume, job_description, company_info);
    let result = ask_json::<Value>(llm, &prompt)
        .await
        .and_then(rescale_score);
    StageOutput::resolve("match_scoring", result, fallback_match)
}

/// Moves the model's 0–100 `score` to `raw_score` and replaces `score` with
/// its 0.0–1.0 equivalent. A reply without `score` gets the neutral 0.5.
pub fn rescale_score(value: Value) -> Result<Value, LlmError> {
    let Value::Object(mut map) = value else {
        return Err(LlmError::Schema("match reply is not a JSON object".to_string()));
    };

    match map.remove("score") {
        None => {
            map.insert("score".to_string(), json!(DEFAULT_SCORE));
        }
        Some(raw) => {
            let score = raw
                .as_f64()
                .filter(|s| (0.0..=100.0).contains(s))
                .ok_or_else(|| LlmError::Schema(format!("score {raw} is not a number in 0-100")))?;
            if !map.contains_key("interpretation") {
                map.insert(
                    "interpretation".to_string(),
                    json!(FitBand::from_score(score).label()),
                );
            }
            map.insert("raw_score".to_string(), raw);
            map.insert("score".to_string(), json!(score / 100.0));
        }
    }

    Ok(Value::Object(map))
}

/// Neutral result: every criterion at 5/10, overall 50 → 0.5.
pub fn fallback_match() -> Value {
    let details: Map<String, Value> = STANDARD_DIMENSIONS
        .iter()
        .map(|dim| {
            let mut entry = json!({
                "raw_score": FALLBACK_CRITERION_SCORE,
                "weighted_score": f64::from(FALLBACK_CRITERION_SCORE * dim.weight) / 10.0,
                "analysis": FALLBACK_ANALYSIS,
            });
            if dim.key == SKILLS_DIMENSION_KEY {
                entry["matching_skills"] = json!([]);
                entry["missing_skills"] = json!([]);
            }
            (dim.key.to_string(), entry)
        })
        .collect();

    json!({
        "score": DEFAULT_SCORE,
        "raw_score": FALLBACK_RAW_SCORE,
        "interpretation": FitBand::Moderate.label(),
        "details": details,
        "red_flags": [FALLBACK_RED_FLAG],
        "bonus_points": [],
    })
}
