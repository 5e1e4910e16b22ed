// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

pub mod config;
pub mod sensor;

pub use config::{EntryConfig, PriceArea};
pub use sensor::{SensorKind, SensorSpec, SensorValue};
