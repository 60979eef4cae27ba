//! Role evaluator: classifies the job into a role category and adapts a
//! standard evaluation with role-specific criteria and insights.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::llm_client::{ask_json, LlmError, TextGenerator};
use crate::matching::criteria::{get_adapted_evaluation_criteria, Criterion, RoleCategory};
use crate::matching::fallback::StageOutput;
use crate::matching::job_matcher::FALLBACK_ANALYSIS;
use crate::matching::prompts::{build_insights_prompt, build_role_prompt};

const FALLBACK_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleClassification {
    pub role_type: String,
    pub confidence: f64,
    #[serde(default)]
    pub justification: String,
}

impl RoleClassification {
    pub fn fallback() -> Self {
        Self {
            role_type: RoleCategory::Other.label().to_string(),
            confidence: FALLBACK_CONFIDENCE,
            justification: FALLBACK_ANALYSIS.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RoleInsights {
    #[serde(default)]
    role_specific_insights: Vec<String>,
}

/// Classifies a job description into one of the ten role categories.
/// Falls back to "Other" at 0.5 confidence on any failure.
pub async fn determine_role_type(
    job_description: &Value,
    llm: &dyn TextGenerator,
) -> StageOutput<RoleClassification> {
    let prompt = build_role_prompt(job_description);
    let result = ask_json::<RoleClassification>(llm, &prompt)
        .await
        .and_then(validate_classification);
    StageOutput::resolve("role_classification", result, RoleClassification::fallback)
}

fn validate_classification(mut role: RoleClassification) -> Result<RoleClassification, LlmError> {
    role.role_type = role.role_type.trim().to_string();
    if role.role_type.is_empty() {
        return Err(LlmError::Schema("role_type is empty".to_string()));
    }
    if !role.confidence.is_finite() {
        return Err(LlmError::Schema("confidence is not finite".to_string()));
    }
    role.confidence = role.confidence.clamp(0.0, 1.0);
    Ok(role)
}

/// Classify → look up criteria → ask for role-specific insights → merge into
/// a copy of `standard`. If the insights step fails, `standard` comes back
/// unchanged, without role data.
pub async fn adapt_evaluation(
    job_description: &Value,
    standard: Value,
    llm: &dyn TextGenerator,
) -> StageOutput<Value> {
    let role = determine_role_type(job_description, llm).await.into_value();
    let criteria = get_adapted_evaluation_criteria(&role.role_type);
    info!(role_type = %role.role_type, confidence = role.confidence, "Role classified");

    let prompt = build_insights_prompt(&role.role_type, job_description, &standard);
    let result = ask_json::<RoleInsights>(llm, &prompt)
        .await
        .and_then(|insights| {
            merge_adaptation(&standard, &role, criteria, insights.role_specific_insights)
        });
    StageOutput::resolve("role_adaptation", result, || standard)
}

fn merge_adaptation(
    standard: &Value,
    role: &RoleClassification,
    criteria: &[Criterion],
    insights: Vec<String>,
) -> Result<Value, LlmError> {
    let Value::Object(base) = standard else {
        return Err(LlmError::Schema("standard evaluation is not a JSON object".to_string()));
    };
    let mut adapted = base.clone();
    adapted.insert("role_type".to_string(), json!(role.role_type));
    adapted.insert("role_confidence".to_string(), json!(role.confidence));
    adapted.insert("adapted_criteria".to_string(), json!(criteria));
    adapted.insert("role_specific_insights".to_string(), json!(insights));
    Ok(Value::Object(adapted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;

    fn standard() -> Value {
        json!({"score": 0.8, "raw_score": 80, "details": {}, "red_flags": [], "bonus_points": []})
    }

    #[tokio::test]
    async fn test_classification_decoded() {
        let llm = ScriptedGenerator::new().reply(
            r#"{"role_type": "Engineering/Technical", "confidence": 0.93, "justification": "Backend role"}"#,
        );
        let out = determine_role_type(&json!({"title": "Backend Engineer"}), &llm).await;
        assert_eq!(
            out,
            StageOutput::Model(RoleClassification {
                role_type: "Engineering/Technical".to_string(),
                confidence: 0.93,
                justification: "Backend role".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_classification_fallback_is_other() {
        let llm = ScriptedGenerator::new().reply("I think this is an engineering role.");
        let out = determine_role_type(&json!({}), &llm).await;
        assert!(out.is_fallback());
        assert_eq!(out.into_value(), RoleClassification::fallback());
    }

    #[tokio::test]
    async fn test_confidence_is_clamped() {
        let llm =
            ScriptedGenerator::new().reply(r#"{"role_type": " Legal ", "confidence": 1.7}"#);
        let role = determine_role_type(&json!({}), &llm).await.into_value();
        assert_eq!(role.role_type, "Legal");
        assert_eq!(role.confidence, 1.0);
        assert_eq!(role.justification, "");
    }

    #[tokio::test]
    async fn test_adaptation_merges_role_data() {
        let llm = ScriptedGenerator::new()
            .reply(r#"{"role_type": "Marketing/Sales", "confidence": 0.8, "justification": "Quota"}"#)
            .reply("```json\n{\"role_specific_insights\": [\"Strong CRM use\", \"No B2B history\", \"Clear metrics\"]}\n```");
        let out = adapt_evaluation(&json!({"title": "AE"}), standard(), &llm).await;
        assert!(!out.is_fallback());

        let value = out.into_value();
        assert_eq!(value["raw_score"], json!(80));
        assert_eq!(value["role_type"], "Marketing/Sales");
        assert_eq!(value["role_confidence"], json!(0.8));
        assert_eq!(value["adapted_criteria"][1], json!({"name": "Results & Metrics", "weight": 25}));
        assert_eq!(value["role_specific_insights"].as_array().unwrap().len(), 3);

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("recruitment for Marketing/Sales roles"));
        assert!(prompts[1].contains(r#""raw_score":80"#));
    }

    #[tokio::test]
    async fn test_insights_failure_returns_standard_unchanged() {
        let llm = ScriptedGenerator::new()
            .reply(r#"{"role_type": "Engineering/Technical", "confidence": 0.9, "justification": "x"}"#)
            .fail(429);
        let out = adapt_evaluation(&json!({}), standard(), &llm).await;
        assert!(out.is_fallback());
        assert_eq!(out.into_value(), standard());
    }

    #[tokio::test]
    async fn test_classification_fallback_still_requests_insights() {
        let llm = ScriptedGenerator::new()
            .fail(500)
            .reply(r#"{"role_specific_insights": ["General fit"]}"#);
        let value = adapt_evaluation(&json!({}), standard(), &llm).await.into_value();
        assert_eq!(value["role_type"], "Other");
        assert_eq!(value["role_confidence"], json!(0.5));
        assert_eq!(value["adapted_criteria"].as_array().unwrap().len(), 7);
        assert_eq!(value["role_specific_insights"], json!(["General fit"]));
    }

    #[tokio::test]
    async fn test_reply_without_insights_key_gives_empty_list() {
        let llm = ScriptedGenerator::new()
            .reply(r#"{"role_type": "Legal", "confidence": 0.7, "justification": "Contracts"}"#)
            .reply(r#"{"notes": "nothing"}"#);
        let value = adapt_evaluation(&json!({}), standard(), &llm).await.into_value();
        assert_eq!(value["role_specific_insights"], json!([]));
    }
}
