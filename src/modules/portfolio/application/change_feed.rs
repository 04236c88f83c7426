//! In-process feed of table writes.
//!
//! Admin services publish a [`TableChange`] after each successful write;
//! change subscriptions listen here and re-fetch the affected table.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::modules::portfolio::domain::entities::Table;

const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableChange {
    pub table: Table,
    pub kind: ChangeKind,
    pub at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<TableChange>,
}

impl ChangeFeed {
    /// Slow receivers observe `RecvError::Lagged` once `capacity` changes queue up.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, table: Table, kind: ChangeKind) {
        let change = TableChange {
            table,
            kind,
            at: Utc::now(),
        };
        tracing::debug!(table = table.name(), ?kind, "table change");
        // Err only means nobody is listening.
        let _ = self.sender.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TableChange> {
        self.sender.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
