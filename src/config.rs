//! Runtime configuration.
//!
//! Read from the TOML file named by `SHOWROOM_CONFIG`, falling back to
//! defaults when the variable is unset. Missing keys take their defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::reports::DisplayPolicy;

pub const CONFIG_ENV: &str = "SHOWROOM_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowroomConfig {
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Mailbox size of each store actor
    pub channel_buffer: usize,
    /// Cars with this many units or fewer count as low stock
    pub low_stock_threshold: u32,
    /// Restricts the monthly sales chart to one year
    pub sales_year: Option<i32>,
    pub display: DisplayPolicy,
}

impl Default for ShowroomConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            channel_buffer: 32,
            low_stock_threshold: 2,
            sales_year: None,
            display: DisplayPolicy::default(),
        }
    }
}

impl ShowroomConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse showroom config")?;
        if config.channel_buffer == 0 {
            anyhow::bail!("channel_buffer must be at least 1");
        }
        Ok(config)
    }

    /// Loads the file named by `SHOWROOM_CONFIG`, or returns defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
