//! The `Generator` trait -- the adapter interface for plan generators.
//!
//! Each concrete backend (Ollama today, anything else tomorrow) implements
//! this trait. The trait is intentionally object-safe so it can be stored
//! as `Arc<dyn Generator>` in the [`super::GeneratorRegistry`] and shared
//! across concurrent requests.

use anyhow::Result;
use async_trait::async_trait;

/// Adapter interface for language-model backends that propose plans.
///
/// Implementors translate a (system prompt, user prompt) pair into the
/// model's raw text reply. Parsing that reply into structured data is the
/// caller's job -- a generator that returns garbage text is a valid
/// generator; the validator deals with it downstream.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Identifier for this generator (e.g. the Ollama model name).
    fn name(&self) -> &str;

    /// Request a candidate plan and return the model's raw reply text.
    ///
    /// Errors mean the call itself could not complete (network, model
    /// failure), not that the reply was unusable.
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// Enumerate locally available model names for display.
    async fn list_models(&self) -> Result<Vec<String>>;
}

// Compile-time assertion: Generator must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn Generator) {}
};
