//! charter-core: plan validation and dependency-graph engine.
//!
//! Turns a free-text goal into a structured, validated task plan. A
//! pluggable [`generator::Generator`] (Ollama by default) proposes a raw
//! candidate plan; the validator in [`plan`] normalizes it, drops dangling
//! dependency edges, detects cycles, and returns an immutable [`plan::Plan`]
//! or a typed [`error::PlanError`].

pub mod error;
pub mod generator;
pub mod plan;
pub mod prompt;
pub mod render;
pub mod service;

pub use error::PlanError;
pub use plan::{Plan, PlanContext, validate_candidate};
pub use service::{PlanRequest, Planner};
