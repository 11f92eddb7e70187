//! Plain-text rendering of a validated plan for console output.

use std::fmt::Write as _;

use crate::plan::{Plan, Severity};

const RULE_WIDTH: usize = 72;

/// Render a plan as a sectioned text report.
pub fn render_plan(plan: &Plan) -> String {
    let mut out = String::new();
    let rule = "-".repeat(RULE_WIDTH);

    let _ = writeln!(out, "Plan: {}", plan.meta.goal);
    if let Some(deadline) = &plan.meta.deadline {
        let _ = writeln!(out, "Deadline: {deadline}");
    }
    let _ = writeln!(out, "Model: {}", plan.meta.model);
    let _ = writeln!(
        out,
        "Generated: {}",
        plan.meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if plan.meta.has_cycle {
        let _ = writeln!(out, "\nWARNING: dependency cycle detected");
    }

    let _ = writeln!(out, "\nTasks:\n{rule}");
    if plan.tasks.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for task in &plan.tasks {
        let _ = writeln!(out, "[{}] {}", task.id, task.title);
        if !task.description.is_empty() {
            let _ = writeln!(out, "    {}", task.description);
        }
        let _ = writeln!(out, "    Estimate: {} days", task.estimate_days);
    }

    if !plan.dependencies.is_empty() {
        let _ = writeln!(out, "\nDependencies:\n{rule}");
        for dep in &plan.dependencies {
            let _ = writeln!(out, "  {} -> {}", dep.from, dep.to);
        }
    }

    if !plan.assumptions.is_empty() {
        let _ = writeln!(out, "\nAssumptions:\n{rule}");
        for assumption in &plan.assumptions {
            let _ = writeln!(out, "  - {assumption}");
        }
    }

    if !plan.risks.is_empty() {
        let _ = writeln!(out, "\nRisks:\n{rule}");
        for risk in &plan.risks {
            let marker = match risk.severity {
                Severity::High => "!!",
                Severity::Medium => " !",
                Severity::Low => "  ",
            };
            let _ = writeln!(out, "{marker} {} ({})", risk.title, risk.severity);
            if !risk.mitigation.is_empty() {
                let _ = writeln!(out, "     Mitigation: {}", risk.mitigation);
            }
        }
    }

    if !plan.reasoning.is_empty() {
        let _ = writeln!(out, "\nReasoning:\n{rule}");
        let _ = writeln!(out, "  {}", plan.reasoning);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{PlanContext, validate_candidate};
    use serde_json::json;

    fn sample_plan(cyclic: bool) -> Plan {
        let deps = if cyclic {
            json!([{"from": "T1", "to": "T2"}, {"from": "T2", "to": "T1"}])
        } else {
            json!([{"from": "T1", "to": "T2"}])
        };
        let raw = json!({
            "tasks": [
                {"id": "T1", "title": "Design", "description": "Sketch it", "estimateDays": 1.5},
                {"id": "T2", "title": "Build", "estimateDays": 3},
            ],
            "dependencies": deps,
            "assumptions": ["Team of 2"],
            "risks": [{"title": "Scope creep", "severity": "high", "mitigation": "Freeze scope"}],
            "reasoning": "Design first, then build.",
        });
        let ctx = PlanContext {
            goal: "Launch a product".to_string(),
            deadline: Some("2 weeks".to_string()),
            model: "llama3:latest".to_string(),
        };
        validate_candidate(&raw, &ctx).expect("sample plan should validate")
    }

    #[test]
    fn renders_all_sections() {
        let text = render_plan(&sample_plan(false));
        assert!(text.contains("Plan: Launch a product"));
        assert!(text.contains("Deadline: 2 weeks"));
        assert!(text.contains("[T1] Design"));
        assert!(text.contains("Estimate: 1.5 days"));
        assert!(text.contains("T1 -> T2"));
        assert!(text.contains("- Team of 2"));
        assert!(text.contains("Scope creep (high)"));
        assert!(text.contains("Mitigation: Freeze scope"));
        assert!(text.contains("Design first, then build."));
        assert!(!text.contains("WARNING"));
    }

    #[test]
    fn warns_on_cycle() {
        let text = render_plan(&sample_plan(true));
        assert!(text.contains("WARNING: dependency cycle detected"));
    }

    #[test]
    fn empty_plan_renders_placeholder() {
        let ctx = PlanContext {
            goal: "g".to_string(),
            deadline: None,
            model: "m".to_string(),
        };
        let plan = validate_candidate(&json!({}), &ctx).unwrap();
        let text = render_plan(&plan);
        assert!(text.contains("(none)"));
        assert!(!text.contains("Dependencies:"));
        assert!(!text.contains("Risks:"));
    }
}
