//! Swallow-and-fallback policy for model-backed stages.
//!
//! A stage that calls the model never fails outward. Any gateway or decoding
//! error is logged and replaced by that stage's fixed fallback payload, so the
//! HTTP call still answers 200 with a well-formed body.

use tracing::warn;

use crate::llm_client::LlmError;

/// Outcome of a model-backed stage. Has no error variant.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutput<T> {
    /// Decoded from the model's reply.
    Model(T),
    /// The stage failed; `value` is its fixed substitute.
    Fallback { value: T, reason: String },
}

impl<T> StageOutput<T> {
    /// Keeps a successful result, or logs the failure and builds the fallback.
    pub fn resolve(
        stage: &'static str,
        result: Result<T, LlmError>,
        fallback: impl FnOnce() -> T,
    ) -> Self {
        match result {
            Ok(value) => StageOutput::Model(value),
            Err(e) => {
                warn!(stage, error = %e, "Model stage failed, using fallback payload");
                StageOutput::Fallback {
                    value: fallback(),
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback_reason().is_some()
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            StageOutput::Model(_) => None,
            StageOutput::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn into_value(self) -> T {
        match self {
            StageOutput::Model(value) | StageOutput::Fallback { value, .. } => value,
        }
    }
}
