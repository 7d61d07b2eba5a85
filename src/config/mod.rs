mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const ENV_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_EMBED_DOMAIN: &str = "VIDSRC_EMBED_DOMAIN";
pub const ENV_FRONTEND_ORIGIN: &str = "FRONTEND_ORIGIN";
pub const ENV_ENVIRONMENT: &str = "ENVIRONMENT";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    match find_config_file(&DEFAULT_CONFIG_PATHS) {
        Some(path) => load_config(&path),
        None => Ok(Config::default()),
    }
}

const DEFAULT_CONFIG_PATHS: [&str; 3] = [
    "./config.toml",
    "./anyvod.toml",
    "~/.config/anyvod/config.toml",
];

/// First candidate that exists, with `~` expanded.
fn find_config_file(candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|c| PathBuf::from(shellexpand::tilde(c).as_ref()))
        .find(|p| p.exists())
}

/// Apply process environment overrides on top of file/default config.
pub fn apply_env_overrides(config: &mut Config) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

fn apply_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
        config.catalog.api_key = Some(key.trim().to_string());
    }

    if let Some(domain) = lookup(ENV_EMBED_DOMAIN).filter(|d| !d.trim().is_empty()) {
        config.embed.domain = domain.trim().to_string();
    }

    if let Some(origins) = lookup(ENV_FRONTEND_ORIGIN) {
        config.server.allowed_origins.extend(
            origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from),
        );
    }

    if let Some(environment) = lookup(ENV_ENVIRONMENT).filter(|e| !e.trim().is_empty()) {
        config.server.environment = environment.trim().to_string();
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.embed.domain.trim().is_empty() {
        anyhow::bail!("Embed provider domain cannot be empty");
    }

    let timeouts = [
        config.catalog.timeout_secs,
        config.embed.probe_timeout_secs,
        config.embed.feed_timeout_secs,
    ];
    if timeouts.contains(&0) {
        anyhow::bail!("Upstream timeouts must be greater than 0");
    }

    Ok(())
}

/// Settings that are allowed to be absent but leave part of the API
/// unusable. Check after environment overrides are applied.
pub fn missing_settings(config: &Config) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if config.catalog.api_key.is_none() {
        missing.push(ENV_API_KEY);
    }
    missing
}
