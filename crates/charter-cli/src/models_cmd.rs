//! `charter models` command: list models available on the Ollama daemon.

use std::sync::Arc;

use anyhow::{Context, Result};

use charter_core::Planner;
use charter_core::generator::Generator;

/// Run the models command. Marks the currently configured model with `*`.
pub async fn run_models(planner: Arc<Planner>) -> Result<()> {
    let models = planner
        .generator()
        .list_models()
        .await
        .context("failed to list models")?;

    if models.is_empty() {
        println!("No models available.");
        return Ok(());
    }

    let current = planner.model();
    for model in &models {
        let marker = if model == current { "*" } else { " " };
        println!("{marker} {model}");
    }

    Ok(())
}
