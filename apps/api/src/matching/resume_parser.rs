//! Resume parser: asks the model to structure resume text into a ParsedResume object.

use serde_json::{json, Map, Value};

use crate::llm_client::{ask_json, LlmError, TextGenerator};
use crate::matching::fallback::StageOutput;
use crate::matching::prompts::build_resume_prompt;

/// Name reported in the fallback payload when parsing fails.
pub const PARSING_ERROR_NAME: &str = "Parsing Error";

/// Top-level keys every ParsedResume carries, with their empty value.
fn empty_sections() -> [(&'static str, Value); 7] {
    [
        ("candidate_info", json!({"name": "", "email": ""})),
        ("skills", json!({"technical": [], "soft": []})),
        ("experience", json!([])),
        ("education", json!([])),
        ("certifications", json!([])),
        ("languages", json!([])),
        ("projects", json!([])),
    ]
}

/// Parses resume text with the model. Never fails: on any error the
/// all-empty "Parsing Error" skeleton comes back instead.
pub async fn parse_resume(resume_text: &str, llm: &dyn TextGenerator) -> StageOutput<Value> {
    let prompt = build_resume_prompt(resume_text);
    let result = ask_json::<Value>(llm, &prompt)
        .await
        .and_then(normalize_resume);
    StageOutput::resolve("resume_parsing", result, fallback_resume)
}

/// Ensures every top-level section key is present. Keys the model left out
/// get their empty container.
fn normalize_resume(value: Value) -> Result<Value, LlmError> {
    let Value::Object(mut map) = value else {
        return Err(LlmError::Schema("resume reply is not a JSON object".to_string()));
    };
    for (key, empty) in empty_sections() {
        match map.get(key) {
            Some(v) if !v.is_null() => {}
            _ => {
                map.insert(key.to_string(), empty);
            }
        }
    }
    Ok(Value::Object(map))
}

pub fn fallback_resume() -> Value {
    let mut map: Map<String, Value> = empty_sections()
        .into_iter()
        .map(|(key, empty)| (key.to_string(), empty))
        .collect();
    map.insert(
        "candidate_info".to_string(),
        json!({"name": PARSING_ERROR_NAME, "email": ""}),
    );
    Value::Object(map)
}
