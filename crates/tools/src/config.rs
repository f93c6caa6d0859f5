//! Planner configuration for the command-line tools.
//!
//! Settings come from an optional TOML file; `CHASE_MAX_EXPANSIONS` overrides
//! the per-leg expansion cap when it holds a valid number.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chase_core::PlannerConfig;

pub const MAX_EXPANSIONS_ENV: &str = "CHASE_MAX_EXPANSIONS";

pub fn load_planner_config(path: Option<&Path>) -> Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read planner config: {}", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("Failed to parse planner config: {}", path.display()))
}

pub fn resolve_max_expansions(
    configured: Option<u32>,
    override_value: Option<&str>,
) -> Option<u32> {
    override_value.and_then(|raw| raw.trim().parse::<u32>().ok()).or(configured)
}

pub fn runtime_planner_config(path: Option<&Path>) -> Result<PlannerConfig> {
    let mut config = load_planner_config(path)?;
    let override_value = env::var(MAX_EXPANSIONS_ENV).ok();
    config.max_expansions_per_leg =
        resolve_max_expansions(config.max_expansions_per_leg, override_value.as_deref());
    tracing::debug!(?config, "Planner configuration resolved");
    Ok(config)
}
