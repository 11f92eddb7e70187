//! End-to-end pipeline tests: scripted generator -> planner -> validated plan.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use charter_core::generator::Generator;
use charter_core::{PlanError, PlanRequest, Planner};

/// Generator that records the prompts it was given and replies with a
/// canned body.
struct RecordingGenerator {
    reply: String,
    prompts: std::sync::Mutex<Vec<(String, String)>>,
}

impl RecordingGenerator {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: std::sync::Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Generator for RecordingGenerator {
    fn name(&self) -> &str {
        "recording"
    }

    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        Ok(self.reply.clone())
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec!["recording".to_string()])
    }
}

const FULL_REPLY: &str = r#"{
    "tasks": [
        {"id": "T1", "title": "Research", "description": "Market research", "estimateDays": 2},
        {"id": "T2", "title": "Build MVP", "description": "Core features", "estimateDays": 5.5},
        {"id": "T3", "title": "Launch", "description": "Go live", "estimateDays": 1}
    ],
    "dependencies": [
        {"from": "T1", "to": "T2"},
        {"from": "T2", "to": "T3"},
        {"from": "T3", "to": "T9"}
    ],
    "assumptions": ["Team of 2", "Limited budget"],
    "risks": [
        {"title": "Timeline slip", "severity": "medium", "mitigation": "Cut scope"}
    ],
    "reasoning": "Research feeds the build, build feeds the launch."
}"#;

#[tokio::test]
async fn full_request_flows_through_to_a_consistent_plan() {
    let generator = RecordingGenerator::new(FULL_REPLY);
    let planner = Planner::new(generator.clone());

    let request = PlanRequest {
        goal: "Launch a product in 2 weeks".to_string(),
        deadline: Some("2 weeks".to_string()),
        constraints: vec!["team of 2".to_string(), "limited budget".to_string()],
    };
    let plan = planner.generate_plan(&request).await.expect("should plan");

    assert_eq!(plan.tasks.len(), 3);
    // The T3 -> T9 edge references an unknown task and must be gone.
    assert_eq!(plan.dependencies.len(), 2);
    assert!(!plan.meta.has_cycle);
    assert_eq!(plan.meta.goal, "Launch a product in 2 weeks");
    assert_eq!(plan.meta.deadline.as_deref(), Some("2 weeks"));
    assert_eq!(plan.meta.model, "recording");

    // The generator saw the caller's context in the user prompt.
    let prompts = generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    let (system, user) = &prompts[0];
    assert!(system.contains("ONLY a valid JSON object"));
    assert!(user.contains("Goal: Launch a product in 2 weeks"));
    assert!(user.contains("Deadline/Timebox: 2 weeks"));
    assert!(user.contains("Constraints: team of 2, limited budget"));
}

#[tokio::test]
async fn validated_plan_serializes_and_round_trips() {
    let planner = Planner::new(RecordingGenerator::new(FULL_REPLY));
    let request = PlanRequest {
        goal: "Launch".to_string(),
        ..Default::default()
    };
    let plan = planner.generate_plan(&request).await.expect("should plan");

    // Pure serde dump, no extra encoding rules.
    let json = serde_json::to_string_pretty(&plan).unwrap();
    let reparsed: charter_core::Plan = serde_json::from_str(&json).unwrap();
    assert_eq!(reparsed, plan);
}

#[tokio::test]
async fn bare_string_reply_surfaces_as_malformed_response() {
    let planner = Planner::new(RecordingGenerator::new("no json here"));
    let request = PlanRequest {
        goal: "Launch".to_string(),
        ..Default::default()
    };
    let err = planner.generate_plan(&request).await.unwrap_err();
    assert!(matches!(err, PlanError::MalformedResponse { .. }));
}

#[tokio::test]
async fn one_failed_request_does_not_poison_the_planner() {
    // A shared planner serves a bad request then a good one; requests are
    // independent, so the second succeeds.
    let bad = Planner::new(RecordingGenerator::new("garbage"));
    let request = PlanRequest {
        goal: "Launch".to_string(),
        ..Default::default()
    };
    assert!(bad.generate_plan(&request).await.is_err());

    let good = Planner::new(RecordingGenerator::new(FULL_REPLY));
    let plan = good.generate_plan(&request).await.expect("should plan");
    assert_eq!(plan.tasks.len(), 3);
}

#[tokio::test]
async fn concurrent_requests_share_one_planner() {
    let planner = Arc::new(Planner::new(RecordingGenerator::new(FULL_REPLY)));

    let mut handles = Vec::new();
    for i in 0..8 {
        let planner = planner.clone();
        handles.push(tokio::spawn(async move {
            let request = PlanRequest {
                goal: format!("Goal number {i}"),
                ..Default::default()
            };
            planner.generate_plan(&request).await
        }));
    }

    for handle in handles {
        let plan = handle.await.unwrap().expect("each request should succeed");
        assert_eq!(plan.tasks.len(), 3);
    }
}
