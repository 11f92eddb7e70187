//! Planner service layer.
//!
//! Glues the pieces together for one generation request: build prompts,
//! call the generator, parse its reply as JSON, hand the candidate to the
//! validator. Holds no per-request state, so a single `Planner` can serve
//! concurrent requests without coordination.

use std::sync::Arc;

use crate::error::PlanError;
use crate::generator::Generator;
use crate::plan::{Plan, PlanContext, validate_candidate};
use crate::prompt;

/// One generation request, as composed by the caller.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// The goal to plan for (e.g. "Launch a product in 2 weeks").
    pub goal: String,
    /// Optional deadline or timebox (e.g. "2 weeks", "2025-10-30").
    pub deadline: Option<String>,
    /// Optional constraints (e.g. "team of 2", "no paid ads").
    pub constraints: Vec<String>,
}

/// Turns goals into validated plans using a pluggable generator backend.
pub struct Planner {
    generator: Arc<dyn Generator>,
}

impl Planner {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Name of the underlying generator/model.
    pub fn model(&self) -> &str {
        self.generator.name()
    }

    /// Access the underlying generator (for model listing).
    pub fn generator(&self) -> &dyn Generator {
        self.generator.as_ref()
    }

    /// Generate and validate a plan for the given request.
    ///
    /// Either returns a complete, internally consistent [`Plan`] or a
    /// [`PlanError`]; a failure never leaves partial state behind, and one
    /// failed request does not affect the next.
    pub async fn generate_plan(&self, request: &PlanRequest) -> Result<Plan, PlanError> {
        if request.goal.trim().is_empty() {
            return Err(PlanError::MissingGoal);
        }

        let system_prompt = prompt::build_system_prompt();
        let user_prompt = prompt::build_user_prompt(
            &request.goal,
            request.deadline.as_deref(),
            &request.constraints,
        );

        tracing::info!(goal = %request.goal, model = %self.generator.name(), "generating plan");

        let reply = self
            .generator
            .generate(&system_prompt, &user_prompt)
            .await
            .map_err(|e| PlanError::generation(&e))?;

        let raw: serde_json::Value =
            serde_json::from_str(&reply).map_err(|e| PlanError::MalformedResponse {
                details: e.to_string(),
                raw: Some(reply.clone()),
            })?;

        let ctx = PlanContext {
            goal: request.goal.clone(),
            deadline: request.deadline.clone(),
            model: self.generator.name().to_string(),
        };
        validate_candidate(&raw, &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    /// Generator that replies with a fixed string, or fails.
    struct ScriptedGenerator {
        reply: Result<String, String>,
    }

    impl ScriptedGenerator {
        fn replies(text: &str) -> Arc<dyn Generator> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
            })
        }

        fn fails(message: &str) -> Arc<dyn Generator> {
            Arc::new(Self {
                reply: Err(message.to_string()),
            })
        }
    }

    #[async_trait]
    impl Generator for ScriptedGenerator {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(anyhow!("{message}")),
            }
        }

        async fn list_models(&self) -> Result<Vec<String>> {
            Ok(vec!["scripted".to_string()])
        }
    }

    fn request(goal: &str) -> PlanRequest {
        PlanRequest {
            goal: goal.to_string(),
            deadline: None,
            constraints: vec![],
        }
    }

    #[tokio::test]
    async fn empty_goal_is_rejected_before_generation() {
        let planner = Planner::new(ScriptedGenerator::fails("should never be called"));
        let err = planner.generate_plan(&request("   ")).await.unwrap_err();
        assert!(matches!(err, PlanError::MissingGoal));
    }

    #[tokio::test]
    async fn valid_reply_becomes_a_plan() {
        let planner = Planner::new(ScriptedGenerator::replies(
            r#"{"tasks": [{"id": "T1", "title": "Do it", "estimateDays": 1}],
                "reasoning": "One step."}"#,
        ));
        let plan = planner
            .generate_plan(&request("Ship the thing"))
            .await
            .expect("should validate");
        assert_eq!(plan.tasks.len(), 1);
        assert_eq!(plan.reasoning, "One step.");
        assert_eq!(plan.meta.goal, "Ship the thing");
        assert_eq!(plan.meta.model, "scripted");
    }

    #[tokio::test]
    async fn unparseable_reply_is_malformed_with_raw_text() {
        let planner = Planner::new(ScriptedGenerator::replies("Here is your plan: 1) do stuff"));
        let err = planner.generate_plan(&request("goal")).await.unwrap_err();
        match err {
            PlanError::MalformedResponse { raw, .. } => {
                assert_eq!(raw.as_deref(), Some("Here is your plan: 1) do stuff"));
            }
            other => panic!("expected MalformedResponse, got: {other}"),
        }
    }

    #[tokio::test]
    async fn generator_failure_maps_to_generation_failure() {
        let planner = Planner::new(ScriptedGenerator::fails("connection refused"));
        let err = planner.generate_plan(&request("goal")).await.unwrap_err();
        match err {
            PlanError::GenerationFailure { details } => {
                assert!(details.contains("connection refused"), "details: {details}");
            }
            other => panic!("expected GenerationFailure, got: {other}"),
        }
    }
}
