// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Swedish electricity pricing areas (elområden)
/// Serialized as the numeric identifier the upstream API expects (1-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PriceArea {
    /// SE1 - Luleå
    Se1,
    /// SE2 - Sundsvall
    Se2,
    /// SE3 - Stockholm
    Se3,
    /// SE4 - Malmö
    Se4,
}

impl PriceArea {
    /// Human-readable Swedish area name, used in config entry titles
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Se1 => "Norra Sverige",
            Self::Se2 => "Norra Mellansverige",
            Self::Se3 => "Södra Mellansverige",
            Self::Se4 => "Södra Sverige",
        }
    }

    /// Area code as shown on electricity contracts (SE1-SE4)
    pub fn code(&self) -> &'static str {
        match self {
            Self::Se1 => "SE1",
            Self::Se2 => "SE2",
            Self::Se3 => "SE3",
            Self::Se4 => "SE4",
        }
    }

    /// Numeric identifier used in the upstream query parameter
    pub fn query_value(&self) -> u8 {
        match self {
            Self::Se1 => 1,
            Self::Se2 => 2,
            Self::Se3 => 3,
            Self::Se4 => 4,
        }
    }

    /// List all supported pricing areas
    pub fn all() -> &'static [PriceArea] {
        &[Self::Se1, Self::Se2, Self::Se3, Self::Se4]
    }
}

impl TryFrom<u8> for PriceArea {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Se1),
            2 => Ok(Self::Se2),
            3 => Ok(Self::Se3),
            4 => Ok(Self::Se4),
            other => Err(format!("Unknown pricing area: {other} (expected 1-4)")),
        }
    }
}

impl From<PriceArea> for u8 {
    fn from(area: PriceArea) -> Self {
        area.query_value()
    }
}

impl fmt::Display for PriceArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.display_name())
    }
}

impl FromStr for PriceArea {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "1" | "SE1" => Ok(Self::Se1),
            "2" | "SE2" => Ok(Self::Se2),
            "3" | "SE3" => Ok(Self::Se3),
            "4" | "SE4" => Ok(Self::Se4),
            _ => Err(anyhow::anyhow!(
                "Unknown pricing area: '{}'. Supported areas: {}",
                s,
                Self::all()
                    .iter()
                    .map(|a| a.code())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// Per-entry configuration record
///
/// Created once by the config flow and immutable afterwards; reconfiguring
/// an integration instance replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Pricing area the entry fetches prices for
    /// Accepts both "area" and the original "område" key
    #[serde(alias = "område")]
    pub area: PriceArea,

    /// Refresh interval in minutes
    #[serde(
        default = "default_update_interval",
        alias = "update_interval"
    )]
    pub update_interval_minutes: u64,
}

fn default_update_interval() -> u64 {
    5
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            area: PriceArea::Se1,
            update_interval_minutes: default_update_interval(),
        }
    }
}

impl EntryConfig {
    /// Validate the configuration record
    pub fn validate(&self) -> Result<()> {
        if self.update_interval_minutes == 0 {
            anyhow::bail!("update_interval_minutes must be at least 1 minute");
        }
        Ok(())
    }

    /// Refresh interval as a Duration
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_minutes * 60)
    }
}
