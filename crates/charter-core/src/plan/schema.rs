//! Plan data model.
//!
//! These types map directly to the JSON contract the generator is asked to
//! produce (and that a validated plan is serialized back out as), so the
//! wire keys are camelCase (`estimateDays`, `generatedAt`, `hasCycle`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single unit of work within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier, unique within the plan (e.g. "T1").
    pub id: String,
    /// Short human label.
    #[serde(default)]
    pub title: String,
    /// What needs to be done. Generators sometimes omit this.
    #[serde(default)]
    pub description: String,
    /// Effort estimate in days. Fractional values are allowed.
    #[serde(default)]
    pub estimate_days: f64,
}

/// A directed "must happen before" edge between two task ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dependency {
    /// Id of the task that must complete first.
    pub from: String,
    /// Id of the task that waits on `from`.
    pub to: String,
}

/// Risk severity, lowercase on the wire.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    #[default]
    Medium,
    Low,
}

impl<'de> Deserialize<'de> for Severity {
    /// Lenient deserialization: generators occasionally invent severity
    /// labels, so anything unrecognized repairs to `Medium` instead of
    /// failing the whole plan.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_ascii_lowercase().as_str() {
            "high" => Severity::High,
            "low" => Severity::Low,
            _ => Severity::Medium,
        })
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        };
        f.write_str(s)
    }
}

/// A risk the generator identified for the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Risk {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub mitigation: String,
}

/// Metadata derived during validation, never supplied by the generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanMeta {
    /// The goal text the caller asked to plan for.
    pub goal: String,
    /// Optional deadline or timebox, as given by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// When validation completed.
    pub generated_at: DateTime<Utc>,
    /// Identifier of the generator/model that produced the candidate.
    pub model: String,
    /// Whether the dependency graph contains a cycle. Reported, not fatal;
    /// downstream consumers decide how to treat it.
    pub has_cycle: bool,
}

/// A validated plan: the aggregate returned for one generation request.
///
/// Immutable after validation. A new request produces a wholly new `Plan`;
/// plans are never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub tasks: Vec<Task>,
    /// Dependency edges, post-filtering: every endpoint names a task in
    /// `tasks`.
    pub dependencies: Vec<Dependency>,
    pub assumptions: Vec<String>,
    pub risks: Vec<Risk>,
    /// Brief explanation of the plan structure.
    pub reasoning: String,
    pub meta: PlanMeta,
}
