//! Connection pool construction and the maintenance refresh gate.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::watch;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::Result;

/// Build the Postgres pool from configuration.
pub async fn build_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .min_connections(config.pool_min_size)
        .max_connections(config.pool_max_size)
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect(&config.url)
        .await?;

    info!(
        min = config.pool_min_size,
        max = config.pool_max_size,
        "database pool ready"
    );
    Ok(pool)
}

/// Gate that holds queries while backing data is being refreshed.
///
/// Maintenance jobs mark the gate closed before a bulk reload and open it
/// again afterwards; queries wait on the gate instead of polling. Waiters
/// park on a watch channel and wake when the flag flips back.
#[derive(Clone)]
pub struct RefreshGate {
    tx: watch::Sender<bool>,
}

impl Default for RefreshGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshGate {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx }
    }

    /// Close the gate for a bulk reload.
    pub fn begin_refresh(&self) {
        self.tx.send_replace(false);
        info!("refresh started, queries gated");
    }

    /// Reopen the gate and wake every waiting query.
    pub fn finish_refresh(&self) {
        self.tx.send_replace(true);
        info!("refresh finished, queries released");
    }

    pub fn is_open(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until the gate is open. Returns immediately when no refresh
    /// is in progress.
    pub async fn wait_ready(&self) {
        let mut rx = self.tx.subscribe();
        while !*rx.borrow_and_update() {
            // Sender lives in self, so the channel cannot close here.
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_gate_does_not_block() {
        let gate = RefreshGate::new();
        assert!(gate.is_open());
        gate.wait_ready().await;
    }

    #[tokio::test]
    async fn waiters_are_released_when_refresh_finishes() {
        let gate = RefreshGate::new();
        gate.begin_refresh();
        assert!(!gate.is_open());

        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move {
                gate.wait_ready().await;
            })
        };

        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        gate.finish_refresh();
        waiter.await.unwrap();
        assert!(gate.is_open());
    }
}
