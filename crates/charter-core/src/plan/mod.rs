//! Plan schema, validation, and dependency-graph analysis.

pub mod graph;
pub mod schema;
pub mod validate;

pub use graph::has_cycle;
pub use schema::{Dependency, Plan, PlanMeta, Risk, Severity, Task};
pub use validate::{DEFAULT_REASONING, PlanContext, validate_candidate};
