use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default base for the published reference-files documents.
const DEFAULT_RULESET_SOURCE: &str =
    "https://raw.githubusercontent.com/aarhusstadsarkiv/reference-files/add-version-to-files";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub rulesets: RulesetsConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rulesets: RulesetsConfig::default(),
            sampling: SamplingConfig::default(),
        }
    }
}

/// Where the seven reference-files documents come from.
///
/// `source` is either an `http(s)://` base URL or a local directory holding
/// `to_convert.json` and friends. Local directories let air-gapped archives
/// and tests run without network access.
#[derive(Debug, Deserialize, Clone)]
pub struct RulesetsConfig {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RulesetsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_source() -> String {
    DEFAULT_RULESET_SOURCE.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct SamplingConfig {
    /// Hard cap on examples extracted per unhandled format.
    #[serde(default = "default_max_examples")]
    pub max_examples: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_examples: default_max_examples(),
        }
    }
}

fn default_max_examples() -> u32 {
    10
}

impl RulesetsConfig {
    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }
}

/// Load configuration from `path`.
///
/// A missing file yields the built-in defaults so the tool works with zero
/// configuration. A file that exists but fails to parse or validate is an
/// error.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.rulesets.source.trim().is_empty() {
        anyhow::bail!("rulesets.source must not be empty");
    }

    if config.rulesets.timeout_secs == 0 {
        anyhow::bail!("rulesets.timeout_secs must be > 0");
    }

    if config.sampling.max_examples > 10 {
        anyhow::bail!("sampling.max_examples must be in [0; 10]");
    }

    Ok(config)
}
