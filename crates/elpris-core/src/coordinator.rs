// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::client::ElprisClient;
use crate::errors::ElprisResult;
use chrono::{DateTime, Utc};
use elpris_types::PriceArea;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Shared handle to the latest snapshot
///
/// The inner `Option<Arc<Value>>` is only ever replaced wholesale, so sensor
/// reads are safe while a fetch is in flight and never observe a partial
/// payload.
pub type SnapshotRef = Arc<RwLock<Option<Arc<Value>>>>;

/// Polling coordinator: one timer, one fetch in flight, many readers
///
/// On each tick (and once eagerly at startup) the coordinator fetches the
/// price payload and replaces the shared snapshot. A failed fetch clears the
/// snapshot so dependent sensors report "no data" instead of stale prices.
#[derive(Debug)]
pub struct UpdateCoordinator {
    client: ElprisClient,
    area: PriceArea,
    update_interval: Duration,
    snapshot: SnapshotRef,
    last_success: RwLock<Option<DateTime<Utc>>>,
}

impl UpdateCoordinator {
    pub fn new(client: ElprisClient, area: PriceArea, update_interval: Duration) -> Self {
        Self {
            client,
            area,
            update_interval,
            snapshot: Arc::new(RwLock::new(None)),
            last_success: RwLock::new(None),
        }
    }

    /// Handle for sensors to read the snapshot through
    pub fn snapshot_ref(&self) -> SnapshotRef {
        Arc::clone(&self.snapshot)
    }

    /// Current snapshot, if the last fetch succeeded
    pub fn snapshot(&self) -> Option<Arc<Value>> {
        self.snapshot.read().clone()
    }

    /// Timestamp of the last successful fetch
    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        *self.last_success.read()
    }

    pub fn area(&self) -> PriceArea {
        self.area
    }

    /// Eager refresh at entry setup
    ///
    /// Unlike the periodic ticks, a failure here propagates so the host can
    /// mark the integration load as failed.
    pub async fn first_refresh(&self) -> ElprisResult<()> {
        let payload = self.client.fetch_prices(self.area).await?;
        *self.snapshot.write() = Some(Arc::new(payload));
        *self.last_success.write() = Some(Utc::now());
        info!("✅ Initial price snapshot loaded for {}", self.area);
        Ok(())
    }

    /// One periodic tick: fetch errors are logged and never escape
    async fn refresh(&self) {
        match self.client.fetch_prices(self.area).await {
            Ok(payload) => {
                *self.snapshot.write() = Some(Arc::new(payload));
                *self.last_success.write() = Some(Utc::now());
                debug!("🔄 Price snapshot replaced for {}", self.area);
            }
            Err(e) => {
                // Clear rather than retain: consumers must not display
                // yesterday's prices as current ones.
                *self.snapshot.write() = None;
                error!("❌ Price fetch failed for {}: {}", self.area, e);
            }
        }
    }

    /// Spawn the polling loop; aborting the handle is the teardown hook
    pub fn spawn_polling(self: &Arc<Self>) -> JoinHandle<()> {
        let coordinator = Arc::clone(self);
        info!(
            "⏱️ Polling spot prices for {} every {}s",
            coordinator.area,
            coordinator.update_interval.as_secs()
        );
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(coordinator.update_interval).await;
                coordinator.refresh().await;
            }
        })
    }
}
