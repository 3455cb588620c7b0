use std::{
    collections::HashMap,
    fs::{self, File},
    io::prelude::*,
    path::Path,
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::logging::ProbeLogger;

/// Top-level configuration for the prober, loaded from a TOML file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SonarConfig {
    /// Per-probe deadline in milliseconds, covering connect and read.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Upper bound on concurrently open probe connections.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Servers to probe, in the order results are reported.
    #[serde(default, rename = "server")]
    pub servers: Vec<ServerEntry>,

    #[serde(flatten)]
    pub other_fields: HashMap<String, toml::Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerEntry {
    /// Identifier handed back with the probe result.
    pub name: String,

    /// `host`, `host:port`, or a bracketed IPv6 form; port defaults to 25565.
    pub address: String,
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_max_concurrency() -> usize {
    16
}

impl Default for SonarConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_concurrency: default_max_concurrency(),
            servers: Vec::new(),
            other_fields: HashMap::new(),
        }
    }
}

impl SonarConfig {
    pub fn load(path: &Path) -> Result<Self, SonarConfigLoadError> {
        let raw = fs::read_to_string(path).map_err(SonarConfigLoadError::Io)?;
        let config: Self = toml::from_str(&raw).map_err(SonarConfigLoadError::Parse)?;

        for field in &config.other_fields {
            ProbeLogger::unknown_config_key(field.0, field.1);
        }

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let config_str = toml::to_string(&self)?;
        let mut file = File::create(path)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SonarConfigLoadError {
    #[error("Could not open config")]
    Io(#[from] std::io::Error),
    #[error("Could not parse")]
    Parse(#[from] toml::de::Error),
}
