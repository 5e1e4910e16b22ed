// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

mod config;

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use elpris_core::{
    ConfigFlow, ElprisClient, EntityPlatform, EntryManager, PriceSensor, UserInput,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Console entity platform: registered sensors are reported to the log on
/// every tick, standing in for a host display surface
#[derive(Default)]
struct ConsolePlatform {
    sensors: Mutex<Vec<PriceSensor>>,
}

#[async_trait]
impl EntityPlatform for ConsolePlatform {
    async fn add_entities(&self, sensors: Vec<PriceSensor>) -> Result<()> {
        info!("📟 Registering {} price sensors", sensors.len());
        self.sensors.lock().extend(sensors);
        Ok(())
    }
}

impl ConsolePlatform {
    fn report(&self) {
        let sensors = self.sensors.lock();
        info!("💡 Current sensor values:");
        for sensor in sensors.iter() {
            let spec = sensor.spec();
            let unit = spec.unit.as_deref().unwrap_or("");
            match sensor.native_value() {
                Some(value) => match spec.precision {
                    Some(p) if value.as_f64().is_some() => {
                        let n = value.as_f64().unwrap_or_default();
                        info!("   {} = {:.prec$} {}", spec.name, n, unit, prec = usize::from(p));
                    }
                    _ => info!("   {} = {} {}", spec.name, value, unit),
                },
                None => info!("   {} = (ingen data)", spec.name),
            }
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                println!("Elpris - Swedish spot price integration");
                println!("Version: {VERSION}");
                println!();
                println!("Usage: elpris [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help    Print this help message");
                println!("  -v, --version Print version");
                return Ok(());
            }
            "--version" | "-v" => {
                println!("{VERSION}");
                return Ok(());
            }
            _ => {}
        }
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    runtime.block_on(run())
}

async fn run() -> Result<()> {
    // Respects the RUST_LOG environment variable
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = config::AppConfig::load()?;

    info!("🚀 Starting Elpris v{}", VERSION);
    info!("📋 Configuration Summary:");
    info!("   Pricing area: {}", config.pricing.area);
    info!(
        "   Update interval: {} min",
        config.pricing.update_interval_minutes
    );
    if let Some(url) = &config.system.base_url {
        info!("   Endpoint override: {}", url);
    }

    // The console run hosts exactly one entry, created through the same
    // config flow the host platform would drive.
    let entry = ConfigFlow::create_entry(&UserInput {
        area: config.pricing.area.query_value(),
        update_interval_minutes: config.pricing.update_interval_minutes,
    })
    .map_err(|errors| {
        anyhow::anyhow!(
            "Invalid configuration: {}",
            errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("; ")
        )
    })?;

    let client = match &config.system.base_url {
        Some(url) => ElprisClient::with_base_url(url)?,
        None => ElprisClient::new()?,
    };

    let platform = ConsolePlatform::default();
    let mut manager = EntryManager::new();
    manager
        .setup_entry_with_client(&entry, client, &platform)
        .await
        .context("Integration setup failed")?;

    let interval = entry.config.update_interval();
    loop {
        platform.report();
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("👋 Shutting down");
                manager.unload_entry(&entry.entry_id);
                break;
            }
        }
    }

    Ok(())
}
