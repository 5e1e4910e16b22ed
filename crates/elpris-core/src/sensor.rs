// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::coordinator::SnapshotRef;
use elpris_types::{SensorKind, SensorSpec, SensorValue};
use serde_json::Value;

/// Walk a dotted path key by key through nested JSON objects
///
/// A missing intermediate key or a non-object container yields `None`,
/// never an error.
pub fn lookup_path<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = payload;
    for key in path.split('.') {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}

/// Read-only projection of one payload field
///
/// Wraps the shared snapshot and recomputes its value on every read; holds
/// no state beyond its descriptor.
#[derive(Debug, Clone)]
pub struct PriceSensor {
    spec: SensorSpec,
    snapshot: SnapshotRef,
}

impl PriceSensor {
    pub fn new(spec: SensorSpec, snapshot: SnapshotRef) -> Self {
        Self { spec, snapshot }
    }

    pub fn spec(&self) -> &SensorSpec {
        &self.spec
    }

    /// Current value projected from the snapshot
    ///
    /// `None` when no snapshot is present (not yet fetched, or the last
    /// fetch failed), when the field path misses, or when the field cannot
    /// be coerced to the sensor's kind.
    pub fn native_value(&self) -> Option<SensorValue> {
        let snapshot = self.snapshot.read().clone()?;
        let field = lookup_path(&snapshot, &self.spec.field_path)?;

        match self.spec.kind {
            SensorKind::Monetary | SensorKind::Measurement => {
                coerce_number(field).map(SensorValue::Number)
            }
            SensorKind::Text => coerce_text(field).map(SensorValue::Text),
        }
    }
}

/// JSON numbers pass through; numeric strings coerce like the upstream
/// payload sometimes quotes them
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// The full sensor set of the integration, bound to one shared snapshot
pub fn default_sensors(snapshot: &SnapshotRef) -> Vec<PriceSensor> {
    let specs = vec![
        SensorSpec::monetary("current_price", "Nuvarande Pris"),
        SensorSpec::monetary("max_price", "Högsta Pris"),
        SensorSpec::monetary("min_price", "Lägsta Pris"),
        SensorSpec::monetary("average_price", "Genomsnittspris"),
        SensorSpec::monetary("next_hour_price", "Nästa Timmes Pris"),
        SensorSpec::monetary("previous_hour_price", "Föregående Timmes Pris"),
        SensorSpec::text("price_trend", "Pristrend"),
        SensorSpec::text("tid", "Aktuell Tidsperiod"),
        SensorSpec::text("lowest_price_hour", "Billigaste Timmen"),
        SensorSpec::text("highest_price_hour", "Dyraste Timmen"),
        SensorSpec::text("best_charging_period.start_time", "Bästa Laddperiod Start"),
        SensorSpec::measurement("best_charging_period.duration", "Bästa Laddperiod Längd", "h"),
        SensorSpec::monetary("best_charging_period.average_price", "Bästa Laddperiod Snittpris"),
    ];

    specs
        .into_iter()
        .map(|spec| PriceSensor::new(spec, SnapshotRef::clone(snapshot)))
        .collect()
}
