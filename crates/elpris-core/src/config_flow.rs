// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

use elpris_types::{EntryConfig, PriceArea};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Raw user input from the configuration form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInput {
    /// Numeric pricing area choice (1-4)
    #[serde(alias = "område")]
    pub area: u8,

    /// Refresh interval in minutes
    #[serde(alias = "update_interval")]
    pub update_interval_minutes: u64,
}

impl Default for UserInput {
    fn default() -> Self {
        Self {
            area: 1,
            update_interval_minutes: 5,
        }
    }
}

/// Persisted configuration record produced by a completed flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub entry_id: String,
    pub title: String,
    pub config: EntryConfig,
}

/// A field-keyed validation failure, reported back to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowError {
    pub field: String,
    pub message: String,
}

impl FlowError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

static NEXT_ENTRY: AtomicU64 = AtomicU64::new(1);

/// Configuration form handler
///
/// Collects area and refresh interval, validates them, and creates the
/// persisted configuration record for the entry lifecycle manager.
#[derive(Debug, Default)]
pub struct ConfigFlow;

impl ConfigFlow {
    /// Form choices: numeric id paired with the Swedish area name
    pub fn area_options() -> Vec<(u8, &'static str)> {
        PriceArea::all()
            .iter()
            .map(|area| (area.query_value(), area.display_name()))
            .collect()
    }

    /// Complete the user step: validate the input and create the entry
    pub fn create_entry(input: &UserInput) -> Result<ConfigEntry, Vec<FlowError>> {
        let mut errors = Vec::new();

        let area = match PriceArea::try_from(input.area) {
            Ok(area) => Some(area),
            Err(e) => {
                errors.push(FlowError::new("område", e));
                None
            }
        };

        if input.update_interval_minutes == 0 {
            errors.push(FlowError::new(
                "update_interval",
                "Refresh interval must be at least 1 minute",
            ));
        }

        let Some(area) = area else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let entry_id = format!("elpris_{:04}", NEXT_ENTRY.fetch_add(1, Ordering::Relaxed));
        let title = format!("Elpris ({})", area.display_name());
        info!("📝 Created config entry '{}' [{}]", title, entry_id);

        Ok(ConfigEntry {
            entry_id,
            title,
            config: EntryConfig {
                area,
                update_interval_minutes: input.update_interval_minutes,
            },
        })
    }
}
