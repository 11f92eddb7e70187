mod config;
mod models_cmd;
mod plan_cmd;
mod serve_cmd;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use charter_core::Planner;
use charter_core::generator::{GeneratorRegistry, OllamaGenerator};

use config::CharterConfig;

#[derive(Parser)]
#[command(name = "charter", about = "Goal-to-task-plan generator backed by a local LLM")]
struct Cli {
    /// Ollama model name (overrides CHARTER_MODEL env var and config file)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Ollama base URL (overrides CHARTER_OLLAMA_URL env var and config file)
    #[arg(long, global = true)]
    ollama_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a charter config file
    Init {
        /// Ollama base URL to record in the config
        #[arg(long, default_value = charter_core::generator::ollama::DEFAULT_BASE_URL)]
        url: String,
        /// Default model to record in the config
        #[arg(long, default_value = charter_core::generator::ollama::DEFAULT_MODEL)]
        default_model: String,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate a task plan for a goal
    Plan {
        /// The goal to plan for (e.g. "Launch a product in 2 weeks")
        goal: String,
        /// Deadline or timebox (e.g. "2 weeks", "2025-10-30")
        #[arg(long)]
        deadline: Option<String>,
        /// Constraint to apply (repeatable)
        #[arg(long = "constraint")]
        constraints: Vec<String>,
        /// Write the validated plan JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Serve the planner over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
    /// List models available on the Ollama daemon
    Models,
}

/// Build a planner from resolved configuration. Generators are looked up
/// by model name in a registry so further backends can slot in later.
fn build_planner(resolved: &CharterConfig) -> Result<Arc<Planner>> {
    let generator = OllamaGenerator::builder()
        .base_url(&resolved.ollama_url)
        .model(&resolved.model)
        .temperature(resolved.temperature)
        .build()?;

    let mut registry = GeneratorRegistry::new();
    registry.register(Arc::new(generator));
    let generator = registry
        .get(&resolved.model)
        .with_context(|| format!("no generator registered for model {:?}", resolved.model))?;

    Ok(Arc::new(Planner::new(generator)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            url,
            default_model,
            force,
        } => {
            let path = config::config_path();
            if path.exists() && !force {
                bail!(
                    "config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            config::save_config(&config::ConfigFile {
                ollama: config::OllamaSection { url },
                generation: config::GenerationSection {
                    model: default_model,
                    ..Default::default()
                },
            })
            .context("failed to write config file")?;
            println!("Wrote config to {}", path.display());
        }
        Commands::Plan {
            goal,
            deadline,
            constraints,
            output,
        } => {
            let resolved = CharterConfig::resolve(cli.ollama_url.as_deref(), cli.model.as_deref());
            let planner = build_planner(&resolved)?;
            plan_cmd::run_plan(
                planner,
                &goal,
                deadline.as_deref(),
                &constraints,
                output.as_deref(),
            )
            .await?;
        }
        Commands::Serve { bind, port } => {
            let resolved = CharterConfig::resolve(cli.ollama_url.as_deref(), cli.model.as_deref());
            let planner = build_planner(&resolved)?;
            serve_cmd::run_serve(planner, &bind, port).await?;
        }
        Commands::Models => {
            let resolved = CharterConfig::resolve(cli.ollama_url.as_deref(), cli.model.as_deref());
            let planner = build_planner(&resolved)?;
            models_cmd::run_models(planner).await?;
        }
    }

    Ok(())
}
