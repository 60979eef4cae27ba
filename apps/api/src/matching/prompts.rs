// Prompt templates for the matching pipeline.
// Weighted criteria, bands and role categories are rendered from
// `matching::criteria`, never typed into the template text.

use serde_json::Value;

use crate::llm_client::prompts::{render, JSON_ONLY_INSTRUCTION};
use crate::matching::criteria::{FitBand, RoleCategory, STANDARD_DIMENSIONS};

/// Resume parsing prompt. Replace `{resume_text}`, `{json_only}`.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"You are an expert resume parser. Analyze the following resume and extract structured information.

RESUME TEXT:
```
{resume_text}
```

Extract:
1. Candidate personal information (name, email, phone, location, links)
2. Skills, split into technical and soft skills
3. Work experience (company, title, dates, responsibilities, achievements)
4. Education (degree, field of study, institution, dates)
5. Certifications and licenses
6. Languages spoken
7. Projects, if any

Return a JSON object with this EXACT schema. Use "" for unknown strings and [] for empty lists; never omit a key.
{
  "candidate_info": {
    "name": "",
    "email": "",
    "phone": "",
    "location": {"city": "", "state": "", "country": ""},
    "linkedin": "",
    "website": ""
  },
  "skills": {"technical": [], "soft": []},
  "experience": [
    {
      "company": "",
      "title": "",
      "location": "",
      "start_date": "",
      "end_date": "",
      "responsibilities": [],
      "achievements": []
    }
  ],
  "education": [
    {
      "degree": "",
      "field_of_study": "",
      "institution": "",
      "location": "",
      "start_date": "",
      "end_date": ""
    }
  ],
  "certifications": [{"name": "", "issuer": "", "date": "", "expires": ""}],
  "languages": [{"language": "", "proficiency": ""}],
  "projects": [{"name": "", "description": "", "technologies": [], "url": ""}]
}

{json_only}"#;

/// Match scoring prompt.
/// Replace: {resume_json}, {job_json}, {company_section}, {criteria}, {bands}, {json_only}
pub const MATCH_PROMPT_TEMPLATE: &str = r#"You are an expert AI recruitment assistant. Analyze the match between a candidate's resume and a job description using the standardized evaluation criteria below.

RESUME DATA:
```json
{resume_json}
```

JOB DESCRIPTION:
```json
{job_json}
```
{company_section}
SCORING CRITERIA:
{criteria}

For each criterion:
- Rate it on a 0-10 scale (raw_score)
- weighted_score = (raw_score / 10) * weight
- The overall score is the sum of all weighted scores, out of 100

INTERPRETATION SCALE:
{bands}

Also identify:
- Red flags: employment gaps, missing required skills, inconsistencies, unprofessional formatting
- Bonus points (1-5 each): top company experience, leadership roles, extra certifications, portfolio/GitHub, awards

Return a JSON object with this EXACT schema:
{
  "score": 78,
  "interpretation": "Good Fit – Strong candidate, minor gaps",
  "details": {
    "skills_match": {
      "raw_score": 8,
      "weighted_score": 28,
      "matching_skills": ["Rust", "PostgreSQL"],
      "missing_skills": ["Kubernetes"],
      "analysis": "Strong systems skills; no container orchestration experience."
    },
    "relevant_experience": {"raw_score": 7, "weighted_score": 17.5, "analysis": "..."},
    "education": {"raw_score": 8, "weighted_score": 8, "analysis": "..."},
    "certifications": {"raw_score": 6, "weighted_score": 6, "analysis": "..."},
    "cultural_fit": {"raw_score": 8, "weighted_score": 8, "analysis": "..."},
    "language_proficiency": {"raw_score": 10, "weighted_score": 5, "analysis": "..."},
    "achievements_projects": {"raw_score": 7, "weighted_score": 3.5, "analysis": "..."}
  },
  "red_flags": ["Eight-month employment gap in 2022 with no explanation"],
  "bonus_points": ["Led a team of 4 engineers (2 points)"]
}

{json_only}"#;

/// Company context block inserted into the match prompt when the caller sent one.
/// Replace `{company_json}`.
const COMPANY_SECTION_TEMPLATE: &str = r#"
COMPANY INFORMATION (use for the Cultural Fit criterion):
```json
{company_json}
```
"#;

/// Role classification prompt. Replace: {categories}, {job_json}, {json_only}
pub const ROLE_CLASSIFICATION_PROMPT_TEMPLATE: &str = r#"You are an expert in job classification. Based on the following job description, determine which category the role falls into. Choose ONE of these categories:

{categories}

JOB DESCRIPTION:
```json
{job_json}
```

Return a JSON object with this EXACT schema:
{
  "role_type": "Engineering/Technical",
  "confidence": 0.9,
  "justification": "Backend service ownership with Java and cloud platform requirements."
}

"role_type" must be one of the category names above, spelled exactly as listed. "confidence" is between 0 and 1.

{json_only}"#;

/// Role insights prompt. Replace: {role_type}, {job_json}, {evaluation_json}, {json_only}
pub const ROLE_INSIGHTS_PROMPT_TEMPLATE: &str = r#"You are an expert in recruitment for {role_type} roles. Review this job description and candidate evaluation.

JOB DESCRIPTION:
```json
{job_json}
```

STANDARD EVALUATION:
```json
{evaluation_json}
```

Provide 3-5 insights specific to this {role_type} position about the candidate's match. Tailor them to this type of role and highlight strengths or areas for improvement (for engineering roles: coding experience, problem solving, stack alignment).

Return a JSON object with this EXACT schema:
{
  "role_specific_insights": [
    "Hands-on Rust and PostgreSQL experience matches the service stack",
    "No exposure to the cloud platform named in the description"
  ]
}

{json_only}"#;

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

pub fn build_resume_prompt(resume_text: &str) -> String {
    render(
        RESUME_PARSE_PROMPT_TEMPLATE,
        &[("resume_text", resume_text), ("json_only", JSON_ONLY_INSTRUCTION)],
    )
}

pub fn build_match_prompt(resume: &Value, job: &Value, company: Option<&Value>) -> String {
    let company_section = match company {
        Some(info) if !is_empty_value(info) => {
            let company_json = info.to_string();
            render(COMPANY_SECTION_TEMPLATE, &[("company_json", company_json.as_str())])
        }
        _ => String::new(),
    };
    let resume_json = resume.to_string();
    let job_json = job.to_string();
    let criteria = criteria_list();
    let bands = band_list();

    render(
        MATCH_PROMPT_TEMPLATE,
        &[
            ("resume_json", resume_json.as_str()),
            ("job_json", job_json.as_str()),
            ("company_section", company_section.as_str()),
            ("criteria", criteria.as_str()),
            ("bands", bands.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

pub fn build_role_prompt(job: &Value) -> String {
    let categories = category_list();
    let job_json = job.to_string();
    render(
        ROLE_CLASSIFICATION_PROMPT_TEMPLATE,
        &[
            ("categories", categories.as_str()),
            ("job_json", job_json.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

pub fn build_insights_prompt(role_type: &str, job: &Value, evaluation: &Value) -> String {
    let job_json = job.to_string();
    let evaluation_json = evaluation.to_string();
    render(
        ROLE_INSIGHTS_PROMPT_TEMPLATE,
        &[
            ("role_type", role_type),
            ("job_json", job_json.as_str()),
            ("evaluation_json", evaluation_json.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

/// "1. Skills Match (35% weight): ..." lines for the scoring criteria.
fn criteria_list() -> String {
    STANDARD_DIMENSIONS
        .iter()
        .enumerate()
        .map(|(i, d)| {
            format!(
                "{}. {} ({}% weight, key \"{}\"): {}",
                i + 1,
                d.name,
                d.weight,
                d.key,
                d.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn band_list() -> String {
    FitBand::ALL
        .iter()
        .map(|b| format!("- {}: {}", b.range(), b.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn category_list() -> String {
    RoleCategory::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| match c {
            RoleCategory::Other => format!("{}. {} (specify)", i + 1, c.label()),
            _ => format!("{}. {}", i + 1, c.label()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resume_prompt_embeds_text_verbatim() {
        let prompt = build_resume_prompt("Jane Doe {job_json}\nRust, Go");
        assert!(prompt.contains("Jane Doe {job_json}\nRust, Go"));
        assert!(prompt.contains("\"candidate_info\""));
        assert!(prompt.ends_with(JSON_ONLY_INSTRUCTION));
    }

    #[test]
    fn test_match_prompt_lists_all_weights_and_bands() {
        let prompt = build_match_prompt(&json!({"skills": {}}), &json!({"title": "SRE"}), None);
        for needle in [
            "1. Skills Match (35% weight",
            "2. Relevant Experience (25% weight",
            "3. Education (10% weight",
            "4. Certifications (10% weight",
            "5. Cultural Fit (10% weight",
            "6. Language Proficiency (5% weight",
            "7. Achievements/Projects (5% weight",
            "- 85-100: Excellent Fit",
            "- 70-84: Good Fit",
            "- 50-69: Moderate Fit",
            "- Below 50: Poor Fit",
        ] {
            assert!(prompt.contains(needle), "missing {needle:?}");
        }
        assert!(prompt.contains(r#"{"title":"SRE"}"#));
        assert!(!prompt.contains("COMPANY INFORMATION"));
    }

    #[test]
    fn test_match_prompt_includes_company_when_present() {
        let company = json!({"name": "Acme", "values": ["ownership"]});
        let prompt = build_match_prompt(&json!({}), &json!({}), Some(&company));
        assert!(prompt.contains("COMPANY INFORMATION"));
        assert!(prompt.contains(r#""name":"Acme""#));

        let prompt = build_match_prompt(&json!({}), &json!({}), Some(&json!({})));
        assert!(!prompt.contains("COMPANY INFORMATION"));
    }

    #[test]
    fn test_role_prompt_lists_ten_categories() {
        let prompt = build_role_prompt(&json!({"title": "Paralegal"}));
        assert!(prompt.contains("1. Engineering/Technical"));
        assert!(prompt.contains("9. Customer Service/Support"));
        assert!(prompt.contains("10. Other (specify)"));
        assert!(prompt.contains("Paralegal"));
    }

    #[test]
    fn test_insights_prompt_names_role_twice() {
        let prompt = build_insights_prompt("Legal", &json!({}), &json!({"score": 0.7}));
        assert_eq!(prompt.matches("Legal").count(), 2);
        assert!(prompt.contains(r#"{"score":0.7}"#));
    }
}
