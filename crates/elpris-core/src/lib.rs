// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

pub mod client;
pub mod config_flow;
pub mod coordinator;
pub mod entry;
pub mod errors;
pub mod sensor;

pub use client::{DEFAULT_BASE_URL, ElprisClient};
pub use config_flow::{ConfigEntry, ConfigFlow, FlowError, UserInput};
pub use coordinator::{SnapshotRef, UpdateCoordinator};
pub use entry::{EntityPlatform, EntryManager};
pub use errors::{ElprisError, ElprisResult};
pub use sensor::{PriceSensor, default_sensors, lookup_path};
