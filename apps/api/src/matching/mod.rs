// Resume ↔ job matching.
// Implements: resume parsing, weighted match scoring, role classification and adaptation.
// All model calls go through llm_client; every model-backed stage resolves to a
// fallback payload instead of failing.

pub mod criteria;
pub mod fallback;
pub mod handlers;
pub mod job_matcher;
pub mod prompts;
pub mod resume_parser;
pub mod response;
pub mod role_evaluator;
