use anyhow::{Context, Result};

use crate::knowledge_base::DEFAULT_EXAMPLES;

const DEFAULT_DATASET_PATH: &str = "Dataset.xlsx";
const DEFAULT_API_BASE: &str = "https://api.together.xyz/v1";
const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo";
const DEFAULT_API_KEY_VAR: &str = "TOGETHER_API_KEY";

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_path: String,
    pub knowledge_base_examples: usize,
    pub llm_api_base: String,
    pub llm_model: String,
    /// Name of the variable holding the provider credential. The credential
    /// itself is read on every call, never stored here.
    pub llm_api_key_var: String,
    pub host: String,
    pub port: u16,
    /// Include error detail in 5xx bodies.
    pub debug: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `get`, which returns the raw value of a
    /// variable or `None` when it is unset.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            dataset_path: var_or("DATASET_PATH", DEFAULT_DATASET_PATH),
            knowledge_base_examples: var_or("KNOWLEDGE_BASE_EXAMPLES", &DEFAULT_EXAMPLES.to_string())
                .parse::<usize>()
                .context("KNOWLEDGE_BASE_EXAMPLES must be a non-negative integer")?,
            llm_api_base: var_or("LLM_API_BASE", DEFAULT_API_BASE),
            llm_model: var_or("LLM_MODEL", DEFAULT_MODEL),
            llm_api_key_var: var_or("LLM_API_KEY_VAR", DEFAULT_API_KEY_VAR),
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            debug: parse_flag(&var_or("APP_DEBUG", "true"))
                .context("APP_DEBUG must be true or false")?,
            rust_log: var_or("RUST_LOG", "info"),
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized flag value '{other}'"),
    }
}
