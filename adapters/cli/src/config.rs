use std::{fs, path::Path};

use anyhow::{Context, Result};
use bomber_arena_core::ArenaConfig;

/// Loads an arena configuration from a TOML file.
pub(crate) fn load(path: &Path) -> Result<ArenaConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid config file {}", path.display()))
}

/// Parses TOML; fields that are absent keep their defaults.
pub(crate) fn parse(contents: &str) -> Result<ArenaConfig> {
    let config: ArenaConfig = toml::from_str(contents).context("failed to parse TOML")?;
    config.validate()?;
    Ok(config)
}
