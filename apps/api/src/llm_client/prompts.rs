// Shared prompt fragments and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting pieces.

/// Closing instruction appended to every prompt that expects a JSON reply.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Return ONLY the JSON without any additional text or explanations.";

/// Substitutes `{name}` placeholders in a single pass.
///
/// Substituted values are never rescanned, so user content that happens to
/// contain `{job_json}` stays literal. Braces that do not name a variable
/// (the JSON examples in templates) are copied through.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = vars
            .iter()
            .find(|(name, _)| tail.starts_with(name) && tail[name.len()..].starts_with('}'));
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
