//! Final shape of the match endpoint body.

use serde_json::{json, Value};

pub const MATCH_RESULT_KEY: &str = "match_result";

/// Wraps the adapted evaluation under `match_result`.
pub fn format_response(match_result: Value) -> Value {
    json!({ MATCH_RESULT_KEY: match_result })
}

/// Normalizes a client-supplied job id. Strings are trimmed, numbers are
/// rendered as written; blanks and other JSON types carry no id.
pub fn job_id_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(id) => Some(id.trim().to_string()).filter(|id| !id.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Records the caller's job id at `match_result.job_info.job_id`, creating
/// `job_info` when the evaluation has none.
pub fn attach_job_id(response: &mut Value, job_id: &str) {
    let Some(result) = response
        .get_mut(MATCH_RESULT_KEY)
        .and_then(Value::as_object_mut)
    else {
        return;
    };
    let job_info = result
        .entry("job_info")
        .or_insert_with(|| json!({}));
    match job_info {
        Value::Object(info) => {
            info.insert("job_id".to_string(), json!(job_id));
        }
        other => *other = json!({ "job_id": job_id }),
    }
}
