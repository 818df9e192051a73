//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::config::Config;
use crate::db::{build_pool, PostgresDeviceStore, RefreshGate};
use crate::services::DeviceQueryService;
use crate::Result;

/// State shared across all request handlers. Cloning is cheap; the
/// expensive pieces live behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub device_service: Arc<DeviceQueryService>,
    pub refresh_gate: RefreshGate,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let pool = build_pool(&config.database)
            .await
            .context("failed to connect to the database")?;
        let store = Arc::new(PostgresDeviceStore::new(pool));
        let refresh_gate = RefreshGate::new();

        let device_service = Arc::new(DeviceQueryService::new(
            store,
            refresh_gate.clone(),
            config.paging.clone(),
            Duration::from_secs(config.database.query_timeout_seconds),
        ));

        Ok(Self {
            config: Arc::new(config),
            device_service,
            refresh_gate,
        })
    }
}
