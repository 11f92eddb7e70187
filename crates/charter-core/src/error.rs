//! Error taxonomy for plan generation and validation.

use thiserror::Error;

/// Errors that can end a single generation request.
///
/// A dependency cycle is deliberately *not* in this list: cycles are a
/// structural observation recorded in `PlanMeta::has_cycle`, and the caller
/// decides whether to treat one as fatal.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The caller did not supply a goal. Request-level input error.
    #[error("goal is required")]
    MissingGoal,

    /// The generator's output could not be interpreted as a plan-shaped
    /// object. Carries the decode error and, when available, the raw text
    /// that failed to parse.
    #[error("failed to parse generator response as JSON: {details}")]
    MalformedResponse {
        details: String,
        raw: Option<String>,
    },

    /// The generator call itself failed (network, model error), or an
    /// unexpected failure occurred during normalization. The normalization
    /// path tolerates missing fields, so this is a loose catch-all that
    /// should rarely fire for the latter reason.
    #[error("failed to generate plan: {details}")]
    GenerationFailure { details: String },
}

impl PlanError {
    /// Wrap an underlying generator failure, preserving the full anyhow
    /// context chain in the message.
    pub fn generation(err: &anyhow::Error) -> Self {
        Self::GenerationFailure {
            details: format!("{err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn generation_keeps_context_chain() {
        let err: anyhow::Error = anyhow::anyhow!("connection refused")
            .context("POST /api/chat failed")
            .context("ollama call");
        let plan_err = PlanError::generation(&err);
        let msg = plan_err.to_string();
        assert!(msg.contains("ollama call"), "missing outer context: {msg}");
        assert!(
            msg.contains("connection refused"),
            "missing root cause: {msg}"
        );
    }

    #[test]
    fn malformed_response_displays_details() {
        let err = PlanError::MalformedResponse {
            details: "expected value at line 1".to_string(),
            raw: Some("not json".to_string()),
        };
        assert!(err.to_string().contains("expected value at line 1"));
    }
}
