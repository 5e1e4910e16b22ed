// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency unit used by the upstream API
pub const PRICE_UNIT: &str = "kr/kWh";

/// Value kind of an observable sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Currency-typed price value (kr/kWh, monetary device class)
    Monetary,
    /// Plain text value
    Text,
    /// Plain numeric value with a unit (measurement state class)
    Measurement,
}

/// Descriptor for one observable value
///
/// Fixed at registration time; the sensor itself is stateless and projects
/// its value from the shared snapshot on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSpec {
    /// Stable unique id, e.g. "elpris_current_price"
    pub id: String,
    /// Display name
    pub name: String,
    /// Dotted path into the price payload, e.g. "best_charging_period.duration"
    pub field_path: String,
    /// Value kind
    pub kind: SensorKind,
    /// Unit of measurement, if any
    pub unit: Option<String>,
    /// Suggested display precision for numeric values
    pub precision: Option<u8>,
}

impl SensorSpec {
    /// Price sensor: monetary, kr/kWh, three decimals
    pub fn monetary(field_path: impl Into<String>, name: impl Into<String>) -> Self {
        let field_path = field_path.into();
        Self {
            id: sensor_id(&field_path),
            name: name.into(),
            field_path,
            kind: SensorKind::Monetary,
            unit: Some(PRICE_UNIT.to_owned()),
            precision: Some(3),
        }
    }

    /// Text sensor: no unit, no precision
    pub fn text(field_path: impl Into<String>, name: impl Into<String>) -> Self {
        let field_path = field_path.into();
        Self {
            id: sensor_id(&field_path),
            name: name.into(),
            field_path,
            kind: SensorKind::Text,
            unit: None,
            precision: None,
        }
    }

    /// Numeric measurement sensor with an explicit unit
    pub fn measurement(
        field_path: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        let field_path = field_path.into();
        Self {
            id: sensor_id(&field_path),
            name: name.into(),
            field_path,
            kind: SensorKind::Measurement,
            unit: Some(unit.into()),
            precision: None,
        }
    }
}

fn sensor_id(field_path: &str) -> String {
    format!("elpris_{field_path}")
}

/// A projected sensor reading
#[derive(Debug, Clone, PartialEq)]
pub enum SensorValue {
    Number(f64),
    Text(String),
}

impl SensorValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}
