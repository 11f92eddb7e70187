//! Configuration file management for charter.
//!
//! Provides a TOML-based config file at `~/.config/charter/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use charter_core::generator::ollama::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub ollama: OllamaSection,
    #[serde(default)]
    pub generation: GenerationSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaSection {
    pub url: String,
}

impl Default for OllamaSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationSection {
    pub model: String,
    pub temperature: f64,
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the charter config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/charter` or `~/.config/charter`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("charter");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("charter")
}

/// Return the path to the charter config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct CharterConfig {
    pub ollama_url: String,
    pub model: String,
    pub temperature: f64,
}

impl CharterConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config
    /// file > default.
    ///
    /// - Ollama URL: `cli_url` > `CHARTER_OLLAMA_URL` > `[ollama].url` > localhost default
    /// - Model: `cli_model` > `CHARTER_MODEL` > `[generation].model` > `llama3:latest`
    /// - Temperature: `[generation].temperature` > 0.3 (no flag or env var)
    pub fn resolve(cli_url: Option<&str>, cli_model: Option<&str>) -> Self {
        let file_config = load_config().ok();

        let ollama_url = if let Some(url) = cli_url {
            url.to_string()
        } else if let Ok(url) = std::env::var("CHARTER_OLLAMA_URL") {
            url
        } else if let Some(ref cfg) = file_config {
            cfg.ollama.url.clone()
        } else {
            DEFAULT_BASE_URL.to_string()
        };

        let model = if let Some(model) = cli_model {
            model.to_string()
        } else if let Ok(model) = std::env::var("CHARTER_MODEL") {
            model
        } else if let Some(ref cfg) = file_config {
            cfg.generation.model.clone()
        } else {
            DEFAULT_MODEL.to_string()
        };

        let temperature = file_config
            .map(|cfg| cfg.generation.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE);

        Self {
            ollama_url,
            model,
            temperature,
        }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
