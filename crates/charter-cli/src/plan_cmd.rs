//! `charter plan` command: one-shot plan generation to the console.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use charter_core::render::render_plan;
use charter_core::{PlanRequest, Planner};

/// Run the plan command.
///
/// Generates a plan for `goal`, renders it to stdout, and optionally dumps
/// the validated plan JSON to `output`.
pub async fn run_plan(
    planner: Arc<Planner>,
    goal: &str,
    deadline: Option<&str>,
    constraints: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let request = PlanRequest {
        goal: goal.to_string(),
        deadline: deadline.map(str::to_string),
        constraints: constraints.to_vec(),
    };

    let plan = planner.generate_plan(&request).await?;

    print!("{}", render_plan(&plan));

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&plan).context("failed to serialize plan")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write plan to {}", path.display()))?;
        println!("\nPlan saved to {}", path.display());
    }

    Ok(())
}
