// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

use anyhow::{Context, Result};
use elpris_types::{EntryConfig, PriceArea};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Pricing configuration (area + refresh interval)
    #[serde(default)]
    pub pricing: EntryConfig,

    /// System configuration
    #[serde(default)]
    pub system: SystemConfig,
}

/// System configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Override for the upstream API endpoint (development/testing)
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            base_url: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from supervisor options or a config file
    pub fn load() -> Result<Self> {
        // Supervisor-provided options first (/data/options.json)
        if let Ok(options_str) = std::fs::read_to_string("/data/options.json") {
            let config: AppConfig = serde_json::from_str(&options_str)
                .context("Failed to parse /data/options.json")?;
            info!("✅ Loaded configuration from supervisor options");
            config.validate()?;
            return Ok(config);
        }

        // config.toml for development
        if let Ok(config_str) = std::fs::read_to_string("config.toml") {
            let config: AppConfig =
                toml::from_str(&config_str).context("Failed to parse config.toml")?;
            info!("✅ Loaded configuration from config.toml");
            config.validate()?;
            return Ok(config);
        }

        warn!("No configuration file found, using defaults with environment overrides");
        let config = Self::from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables (development/testing)
    fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(area) = std::env::var("ELPRIS_AREA")
            && let Ok(parsed) = area.parse::<PriceArea>()
        {
            config.pricing.area = parsed;
        }

        if let Ok(interval) = std::env::var("ELPRIS_UPDATE_INTERVAL_MINUTES")
            && let Ok(minutes) = interval.parse::<u64>()
        {
            config.pricing.update_interval_minutes = minutes;
        }

        if let Ok(url) = std::env::var("ELPRIS_BASE_URL") {
            config.system.base_url = Some(url);
        }

        config
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.pricing.validate()?;

        match self.system.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                anyhow::bail!(
                    "Invalid log_level '{}' (must be: trace, debug, info, warn, or error)",
                    other
                );
            }
        }

        Ok(())
    }
}
