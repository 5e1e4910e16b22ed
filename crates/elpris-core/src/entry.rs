// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::client::ElprisClient;
use crate::config_flow::ConfigEntry;
use crate::coordinator::UpdateCoordinator;
use crate::sensor::{PriceSensor, default_sensors};
use anyhow::{Context, Result};
use async_trait::async_trait;
use elpris_types::EntryConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Capability interface to the host platform
///
/// The only thing the host must provide: accept the list of observable
/// values at entry setup. Display, export and naming conventions stay on
/// the host side of this seam.
#[async_trait]
pub trait EntityPlatform: Send + Sync {
    async fn add_entities(&self, sensors: Vec<PriceSensor>) -> Result<()>;
}

/// Runtime state of one loaded entry
#[derive(Debug)]
struct EntryState {
    config: EntryConfig,
    coordinator: Arc<UpdateCoordinator>,
    poll_task: JoinHandle<()>,
}

/// Entry lifecycle manager
///
/// Owns the per-entry coordinator and polling task, keyed by entry id.
#[derive(Debug, Default)]
pub struct EntryManager {
    entries: HashMap<String, EntryState>,
}

impl EntryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set up an entry against the production endpoint
    pub async fn setup_entry(
        &mut self,
        entry: &ConfigEntry,
        platform: &dyn EntityPlatform,
    ) -> Result<()> {
        let client = ElprisClient::new()?;
        self.setup_entry_with_client(entry, client, platform).await
    }

    /// Set up an entry with an explicit client (tests, endpoint overrides)
    ///
    /// Performs the eager first refresh; a failure there propagates so the
    /// host can mark the integration load as failed.
    pub async fn setup_entry_with_client(
        &mut self,
        entry: &ConfigEntry,
        client: ElprisClient,
        platform: &dyn EntityPlatform,
    ) -> Result<()> {
        entry.config.validate()?;

        let coordinator = Arc::new(UpdateCoordinator::new(
            client,
            entry.config.area,
            entry.config.update_interval(),
        ));

        coordinator
            .first_refresh()
            .await
            .with_context(|| format!("Initial price fetch failed for entry {}", entry.entry_id))?;

        let poll_task = coordinator.spawn_polling();
        let sensors = default_sensors(&coordinator.snapshot_ref());

        if let Err(e) = platform.add_entities(sensors).await {
            poll_task.abort();
            return Err(e.context("Failed to register price sensors"));
        }

        self.entries.insert(
            entry.entry_id.clone(),
            EntryState {
                config: entry.config.clone(),
                coordinator,
                poll_task,
            },
        );

        info!("✅ Entry {} set up ({})", entry.entry_id, entry.title);
        Ok(())
    }

    /// Tear down an entry: stop polling and drop its state
    ///
    /// Returns false if the entry was not loaded.
    pub fn unload_entry(&mut self, entry_id: &str) -> bool {
        match self.entries.remove(entry_id) {
            Some(state) => {
                state.poll_task.abort();
                info!("🛑 Entry {} unloaded", entry_id);
                true
            }
            None => {
                warn!("⚠️ Unload requested for unknown entry {}", entry_id);
                false
            }
        }
    }

    /// Reconfigure: unload the old state and set up with the new record
    pub async fn reload_entry(
        &mut self,
        entry: &ConfigEntry,
        client: ElprisClient,
        platform: &dyn EntityPlatform,
    ) -> Result<()> {
        self.unload_entry(&entry.entry_id);
        self.setup_entry_with_client(entry, client, platform).await
    }

    pub fn is_loaded(&self, entry_id: &str) -> bool {
        self.entries.contains_key(entry_id)
    }

    pub fn entry_config(&self, entry_id: &str) -> Option<&EntryConfig> {
        self.entries.get(entry_id).map(|state| &state.config)
    }

    /// Coordinator handle for a loaded entry
    pub fn coordinator(&self, entry_id: &str) -> Option<Arc<UpdateCoordinator>> {
        self.entries
            .get(entry_id)
            .map(|state| Arc::clone(&state.coordinator))
    }
}

impl Drop for EntryState {
    fn drop(&mut self) {
        self.poll_task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_flow::{ConfigFlow, UserInput};
    use elpris_types::{PriceArea, SensorValue};
    use std::time::Duration;
    use mockito::{Matcher, Server};
    use parking_lot::Mutex;
    use serde_json::json;

    /// Collects registered sensors for inspection
    #[derive(Default)]
    struct RecordingPlatform {
        sensors: Mutex<Vec<PriceSensor>>,
    }

    #[async_trait]
    impl EntityPlatform for RecordingPlatform {
        async fn add_entities(&self, sensors: Vec<PriceSensor>) -> Result<()> {
            self.sensors.lock().extend(sensors);
            Ok(())
        }
    }

    fn test_entry() -> ConfigEntry {
        ConfigFlow::create_entry(&UserInput {
            area: 2,
            update_interval_minutes: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_setup_registers_sensors() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"current_price": 1.23}).to_string())
            .create_async()
            .await;

        let client = ElprisClient::with_base_url(server.url()).unwrap();
        let platform = RecordingPlatform::default();
        let mut manager = EntryManager::new();
        let entry = test_entry();

        manager
            .setup_entry_with_client(&entry, client, &platform)
            .await
            .unwrap();

        assert!(manager.is_loaded(&entry.entry_id));
        let sensors = platform.sensors.lock();
        assert_eq!(sensors.len(), 13);

        let current = sensors
            .iter()
            .find(|s| s.spec().id == "elpris_current_price")
            .unwrap();
        assert_eq!(current.native_value(), Some(SensorValue::Number(1.23)));
    }

    #[tokio::test]
    async fn test_setup_fails_when_first_fetch_fails() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = ElprisClient::with_base_url(server.url()).unwrap();
        let platform = RecordingPlatform::default();
        let mut manager = EntryManager::new();
        let entry = test_entry();

        let result = manager
            .setup_entry_with_client(&entry, client, &platform)
            .await;

        assert!(result.is_err());
        assert!(!manager.is_loaded(&entry.entry_id));
        assert!(platform.sensors.lock().is_empty());
    }

    #[tokio::test]
    async fn test_reload_entry_replaces_state() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"current_price": 0.9}).to_string())
            .expect_at_least(2)
            .create_async()
            .await;

        let client = ElprisClient::with_base_url(server.url()).unwrap();
        let platform = RecordingPlatform::default();
        let mut manager = EntryManager::new();
        let entry = test_entry();

        manager
            .setup_entry_with_client(&entry, client, &platform)
            .await
            .unwrap();

        let old_coordinator = manager.coordinator(&entry.entry_id).unwrap();
        assert_eq!(old_coordinator.area(), PriceArea::Se2);
        assert_eq!(
            manager.entry_config(&entry.entry_id).unwrap().area,
            PriceArea::Se2
        );

        let mut updated = entry.clone();
        updated.config.area = PriceArea::Se4;
        updated.config.update_interval_minutes = 15;

        let client = ElprisClient::with_base_url(server.url()).unwrap();
        manager
            .reload_entry(&updated, client, &platform)
            .await
            .unwrap();

        assert!(manager.is_loaded(&entry.entry_id));
        let config = manager.entry_config(&entry.entry_id).unwrap();
        assert_eq!(config.area, PriceArea::Se4);
        assert_eq!(config.update_interval_minutes, 15);

        let new_coordinator = manager.coordinator(&entry.entry_id).unwrap();
        assert!(!Arc::ptr_eq(&old_coordinator, &new_coordinator));
        assert_eq!(new_coordinator.area(), PriceArea::Se4);

        // Both setups registered the full sensor set
        assert_eq!(platform.sensors.lock().len(), 26);

        // The old polling task was aborted; once it is gone our handle is
        // the last reference to the old coordinator.
        for _ in 0..100 {
            if Arc::strong_count(&old_coordinator) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(Arc::strong_count(&old_coordinator), 1);
    }

    #[tokio::test]
    async fn test_unload_entry() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"current_price": 0.5}).to_string())
            .create_async()
            .await;

        let client = ElprisClient::with_base_url(server.url()).unwrap();
        let platform = RecordingPlatform::default();
        let mut manager = EntryManager::new();
        let entry = test_entry();

        manager
            .setup_entry_with_client(&entry, client, &platform)
            .await
            .unwrap();

        assert!(manager.unload_entry(&entry.entry_id));
        assert!(!manager.is_loaded(&entry.entry_id));
        // Second unload is a no-op
        assert!(!manager.unload_entry(&entry.entry_id));
    }
}
