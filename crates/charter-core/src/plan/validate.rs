//! Candidate plan validation and normalization.
//!
//! The generator returns an untrusted, loosely-typed JSON object. This
//! module turns that into a referentially consistent [`Plan`]: missing
//! collections default to empty, duplicate task ids are de-duplicated,
//! dangling dependency edges are dropped, and the dependency graph is
//! checked for cycles. Validation either returns a complete `Plan` or an
//! error; it never leaves partial state and never mutates its input.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::PlanError;
use crate::plan::graph::has_cycle;
use crate::plan::schema::{Dependency, Plan, PlanMeta, Risk, Task};

/// Reasoning text used when the generator omits the field.
pub const DEFAULT_REASONING: &str = "Plan generated automatically";

/// Caller-supplied context attached to the validated plan's metadata.
/// None of these values come from the generator.
#[derive(Debug, Clone)]
pub struct PlanContext {
    /// The goal the caller asked to plan for.
    pub goal: String,
    /// Optional deadline or timebox, verbatim from the caller.
    pub deadline: Option<String>,
    /// Generator/model identifier.
    pub model: String,
}

/// The candidate shape we try to read out of the generator's JSON. Every
/// field is optional; only field *type* mismatches are errors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    dependencies: Vec<Dependency>,
    #[serde(default)]
    assumptions: Vec<String>,
    #[serde(default)]
    risks: Vec<Risk>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Validate and normalize a raw candidate plan.
///
/// Returns a fully populated [`Plan`] or [`PlanError::MalformedResponse`]
/// if `raw` cannot be interpreted as a plan-shaped object at all. Missing
/// fields are recoverable omissions, not errors.
pub fn validate_candidate(raw: &serde_json::Value, ctx: &PlanContext) -> Result<Plan, PlanError> {
    let candidate = Candidate::deserialize(raw).map_err(|e| PlanError::MalformedResponse {
        details: e.to_string(),
        raw: Some(raw.to_string()),
    })?;

    let tasks = dedup_tasks(candidate.tasks);

    let known_ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let dependencies = filter_dependencies(candidate.dependencies, &known_ids);

    let node_ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let edges: Vec<(&str, &str)> = dependencies
        .iter()
        .map(|d| (d.from.as_str(), d.to.as_str()))
        .collect();
    let cycle = has_cycle(&node_ids, &edges);
    if cycle {
        tracing::warn!(goal = %ctx.goal, "dependency cycle detected in generated plan");
    }

    Ok(Plan {
        tasks,
        dependencies,
        assumptions: candidate.assumptions,
        risks: candidate.risks,
        reasoning: candidate
            .reasoning
            .unwrap_or_else(|| DEFAULT_REASONING.to_string()),
        meta: PlanMeta {
            goal: ctx.goal.clone(),
            deadline: ctx.deadline.clone(),
            generated_at: chrono::Utc::now(),
            model: ctx.model.clone(),
            has_cycle: cycle,
        },
    })
}

/// De-duplicate task ids: the first occurrence wins, later duplicates are
/// dropped. Negative estimates are clamped to zero here as well, so every
/// task in the returned list satisfies the schema invariants.
fn dedup_tasks(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen: HashSet<String> = HashSet::with_capacity(tasks.len());
    let mut kept = Vec::with_capacity(tasks.len());
    for mut task in tasks {
        if !seen.insert(task.id.clone()) {
            tracing::warn!(id = %task.id, "dropping task with duplicate id");
            continue;
        }
        if task.estimate_days < 0.0 {
            tracing::warn!(id = %task.id, estimate = task.estimate_days, "clamping negative estimate to 0");
            task.estimate_days = 0.0;
        }
        kept.push(task);
    }
    kept
}

/// Keep only edges whose endpoints both name a known task id. Dropping is
/// silent at the value level; the count is logged for observability.
/// Filtering is a projection: re-running it on an already-filtered list is
/// a no-op.
fn filter_dependencies(deps: Vec<Dependency>, known_ids: &HashSet<&str>) -> Vec<Dependency> {
    let before = deps.len();
    let kept: Vec<Dependency> = deps
        .into_iter()
        .filter(|d| known_ids.contains(d.from.as_str()) && known_ids.contains(d.to.as_str()))
        .collect();
    let dropped = before - kept.len();
    if dropped > 0 {
        tracing::debug!(dropped, "dropped dependency edges with unknown endpoints");
    }
    kept
}
