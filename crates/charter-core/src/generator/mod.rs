//! Generator adapter interface for language-model backends.
//!
//! Defines the [`Generator`] trait all backends implement, the
//! [`GeneratorRegistry`] for runtime lookup by name, and the
//! [`OllamaGenerator`] adapter for a local Ollama daemon.

pub mod ollama;
pub mod registry;
pub mod trait_def;

pub use ollama::{OllamaGenerator, OllamaGeneratorBuilder};
pub use registry::GeneratorRegistry;
pub use trait_def::Generator;
