use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::paths::Paths;

fn default_output() -> PathBuf {
    PathBuf::from("policies.json")
}

fn default_standard() -> String {
    "NIST".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_prompt() -> String {
    "Generate security group OPA policy for EC2.".to_string()
}

/// Top-level configuration structure loaded from `config.toml`.
///
/// Only `[repository].url` is required; everything else has a sensible
/// default. The OpenAI API key is deliberately *not* part of this file,
/// it is read from the `OPENAI_API_KEY` environment variable.
///
/// Example TOML:
/// ```toml
/// [repository]
/// url = "https://github.com/yourorg/policies.git"
///
/// [dataset]
/// compliance_standard = "NIST"
///
/// [openai]
/// model = "gpt-3.5-turbo"
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    pub repository: Repository,
    #[serde(default)]
    pub dataset: Dataset,
    #[serde(default)]
    pub openai: OpenAi,
}

/// `[repository]` section: where the policy files come from.
#[derive(Debug, Deserialize)]
pub struct Repository {
    /// Git URL passed verbatim to `git clone`.
    pub url: String,
    /// Checkout directory. Defaults to `$(opg home)/repo`.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// `[dataset]` section: where and how the collected records are written.
#[derive(Debug, Deserialize)]
pub struct Dataset {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Compliance tag stamped uniformly on every record of a run.
    #[serde(default = "default_standard")]
    pub compliance_standard: String,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            output: default_output(),
            compliance_standard: default_standard(),
        }
    }
}

/// `[openai]` section: model and endpoint for the generation step.
#[derive(Debug, Deserialize)]
pub struct OpenAi {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Prompt used by `opg run` when `--prompt` is not given.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for OpenAi {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_url: default_api_url(),
            prompt: default_prompt(),
        }
    }
}

impl Config {
    /// Effective checkout directory for the policy repository.
    pub fn repo_dir(&self, p: &Paths) -> PathBuf {
        self.repository.dir.clone().unwrap_or_else(|| p.repo.clone())
    }
}

/// Load and parse `config.toml` into a [`Config`] structure.
///
/// # Errors
/// - Returns an error if `config.toml` cannot be read.
/// - Returns an error if parsing the TOML fails.
pub fn load_config(p: &Paths) -> Result<Config> {
    let txt = fs::read_to_string(&p.config).with_context(|| {
        format!(
            "config not found: {} (run `opg init` to create one)",
            p.config.display()
        )
    })?;
    let cfg: Config = toml::from_str(&txt).context("failed to parse config.toml")?;
    Ok(cfg)
}
