//! Repository layer over the lab workbook

pub mod equipment;
pub mod faults;
pub mod loader;
pub mod proposals;
pub mod remarks;
pub mod reservations;
pub mod sheets;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::OnceCell;

use crate::{
    config::StoreConfig,
    error::{AppError, AppResult},
};
pub use loader::LabSnapshot;
use store::TableStore;

/// Main repository struct holding the store handle and the memoized snapshot
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn TableStore>,
    snapshot: Cache<(), Arc<LabSnapshot>>,
    connected: Arc<OnceCell<()>>,
    connect_attempts: u32,
    connect_delay: Duration,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn TableStore>, config: &StoreConfig) -> Self {
        let snapshot = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.cache_ttl())
            .build();

        Self {
            store,
            snapshot,
            connected: Arc::new(OnceCell::new()),
            connect_attempts: config.connect_attempts.max(1),
            connect_delay: config.connect_delay(),
        }
    }

    /// Connected store handle; connects on first use
    pub async fn store(&self) -> AppResult<&dyn TableStore> {
        self.connected
            .get_or_try_init(|| self.connect_with_retry())
            .await?;
        Ok(self.store.as_ref())
    }

    pub fn is_connected(&self) -> bool {
        self.connected.initialized()
    }

    /// Fixed number of attempts with a fixed delay between them
    async fn connect_with_retry(&self) -> AppResult<()> {
        let mut last_error = None;

        for attempt in 1..=self.connect_attempts {
            match self.store.connect().await {
                Ok(()) => {
                    tracing::info!("Connected to table store (attempt {})", attempt);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        "Table store connection attempt {}/{} failed: {}",
                        attempt,
                        self.connect_attempts,
                        e
                    );
                    last_error = Some(e);
                    if attempt < self.connect_attempts {
                        tokio::time::sleep(self.connect_delay).await;
                    }
                }
            }
        }

        Err(AppError::StoreUnavailable(
            last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no connection attempt made".to_string()),
        ))
    }
}
