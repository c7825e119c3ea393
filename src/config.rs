//! Analysis configuration (`concept.toml`)

use anyhow::Context;
use concept_schema::GraphFilterParams;
use serde::Deserialize;
use std::path::Path;

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "concept.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub graph: GraphFilterParams,
}

impl AnalysisConfig {
    /// Read an explicit config file, or `concept.toml` if it exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path,
            None if Path::new(CONFIG_FILE).exists() => Path::new(CONFIG_FILE),
            None => return Ok(Self::default()),
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
