use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::parsing::segmenter::DEFAULT_SECTION_THRESHOLD;
use crate::parsing::taxonomy::DEFAULT_MATCH_THRESHOLD;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Enables the model fallback and the screening agents when present.
    pub anthropic_api_key: Option<String>,
    /// Strict acceptance gate for heuristic section headers.
    pub section_threshold: f64,
    /// Acceptance gate for direct header normalisation.
    pub match_threshold: f64,
    pub llm_fallback_enabled: bool,
    /// Overall deadline for one model-backed segmentation.
    pub llm_timeout: Duration,
    /// Per-attempt HTTP timeout inside the LLM client's retry loop.
    pub llm_request_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            section_threshold: threshold_or(&lookup, "SECTION_THRESHOLD", DEFAULT_SECTION_THRESHOLD)?,
            match_threshold: threshold_or(&lookup, "MATCH_THRESHOLD", DEFAULT_MATCH_THRESHOLD)?,
            llm_fallback_enabled: parse_or(&lookup, "LLM_FALLBACK_ENABLED", false)?,
            llm_timeout: Duration::from_secs(parse_or(&lookup, "LLM_TIMEOUT_SECS", 60)?),
            llm_request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "LLM_REQUEST_TIMEOUT_SECS",
                15,
            )?),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn threshold_or<F>(lookup: &F, key: &str, default: f64) -> Result<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_or(lookup, key, default)?;
    if !(0.0..=1.0).contains(&value) {
        bail!("{key} must be between 0 and 1, got {value}");
    }
    Ok(value)
}
