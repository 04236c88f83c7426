//! Online/offline flag for the hosted backend.
//!
//! The flag is advisory: concurrent probes and fetches may race, and the
//! last writer wins.

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::modules::backend::application::ports::outgoing::{
    ObjectStorage, SelectQuery, TableGateway,
};
use crate::modules::portfolio::domain::entities::Table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ConnectionStatus {
    pub is_online: bool,
    pub last_error: Option<String>,
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self {
            is_online: true,
            last_error: None,
        }
    }
}

pub struct ConnectionMonitor {
    tables: Arc<dyn TableGateway>,
    storage: Arc<dyn ObjectStorage>,
    bucket: String,
    status: RwLock<ConnectionStatus>,
}

impl ConnectionMonitor {
    pub fn new(
        tables: Arc<dyn TableGateway>,
        storage: Arc<dyn ObjectStorage>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            tables,
            storage,
            bucket: bucket.into(),
            status: RwLock::new(ConnectionStatus::default()),
        }
    }

    /// Cheapest possible read: one id from `projects`.
    pub async fn probe(&self) -> bool {
        let query = SelectQuery::all().columns("id").limit(1);
        match self.tables.select(Table::Projects.name(), query, None).await {
            Ok(_) => {
                self.mark_online();
                true
            }
            Err(e) => {
                warn!("Connection probe failed: {}", e);
                self.mark_offline(e.describe());
                false
            }
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_online(&self) -> bool {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_online
    }

    pub fn mark_online(&self) {
        let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
        if !status.is_online {
            info!("Backend connection restored");
        }
        *status = ConnectionStatus::default();
    }

    pub fn mark_offline(&self, error: impl Into<String>) {
        *self.status.write().unwrap_or_else(PoisonError::into_inner) = ConnectionStatus {
            is_online: false,
            last_error: Some(error.into()),
        };
    }

    /// Lists a single object in the configured bucket. Does not touch the flag.
    pub async fn storage_reachable(&self) -> bool {
        match self.storage.list(&self.bucket, "", 1).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Storage bucket '{}' not reachable: {}", self.bucket, e);
                false
            }
        }
    }
}
