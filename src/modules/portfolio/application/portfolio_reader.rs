//! Read side of the portfolio: one fetcher per resource type.
//!
//! Fetchers never fail. A successful read refreshes the fallback cache and
//! marks the backend online; a failed read marks it offline and hands back
//! the last cached snapshot.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::modules::backend::application::ports::outgoing::{
    BackendError, Filter, SelectQuery, TableGateway,
};
use crate::modules::portfolio::application::change_feed::ChangeFeed;
use crate::modules::portfolio::application::connection_monitor::ConnectionMonitor;
use crate::modules::portfolio::application::fallback_cache::{CachedResource, FallbackCache};
use crate::modules::portfolio::domain::entities::{
    PersonalInfo, Project, SocialLink, Table, Testimonial,
};

//
// ──────────────────────────────────────────────────────────
// Resources
// ──────────────────────────────────────────────────────────
//

/// A cached payload and the query that produces it.
pub trait PortfolioResource: CachedResource {
    const TABLE: Table;

    fn query() -> SelectQuery;

    fn from_rows(rows: Vec<Value>) -> Result<Self, BackendError>;
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, BackendError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| BackendError::Decode(e.to_string())))
        .collect()
}

impl PortfolioResource for Vec<Project> {
    const TABLE: Table = Table::Projects;

    fn query() -> SelectQuery {
        SelectQuery::all().order_desc("created_at")
    }

    fn from_rows(rows: Vec<Value>) -> Result<Self, BackendError> {
        decode_rows(rows)
    }
}

impl PortfolioResource for Vec<Testimonial> {
    const TABLE: Table = Table::Testimonials;

    fn query() -> SelectQuery {
        SelectQuery::all().order_desc("created_at")
    }

    fn from_rows(rows: Vec<Value>) -> Result<Self, BackendError> {
        decode_rows(rows)
    }
}

impl PortfolioResource for Vec<SocialLink> {
    const TABLE: Table = Table::SocialLinks;

    fn query() -> SelectQuery {
        SelectQuery::all().filter(Filter::eq("is_visible", true))
    }

    fn from_rows(rows: Vec<Value>) -> Result<Self, BackendError> {
        decode_rows(rows)
    }
}

impl PortfolioResource for Option<PersonalInfo> {
    const TABLE: Table = Table::PersonalInfo;

    fn query() -> SelectQuery {
        SelectQuery::all().limit(1)
    }

    /// Zero rows is a valid, empty profile.
    fn from_rows(rows: Vec<Value>) -> Result<Self, BackendError> {
        Ok(decode_rows(rows)?.into_iter().next())
    }
}

//
// ──────────────────────────────────────────────────────────
// Snapshot
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PortfolioSnapshot {
    pub projects: Vec<Project>,
    pub testimonials: Vec<Testimonial>,
    pub social_links: Vec<SocialLink>,
    pub personal_info: Option<PersonalInfo>,
    pub is_online: bool,
    pub error: Option<String>,
}

impl PortfolioSnapshot {
    pub fn empty() -> Self {
        Self {
            projects: Vec::new(),
            testimonials: Vec::new(),
            social_links: Vec::new(),
            personal_info: None,
            is_online: true,
            error: None,
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Reader
// ──────────────────────────────────────────────────────────
//

#[derive(Clone)]
pub struct PortfolioReader {
    tables: Arc<dyn TableGateway>,
    cache: Arc<FallbackCache>,
    monitor: Arc<ConnectionMonitor>,
    changes: ChangeFeed,
}

impl PortfolioReader {
    pub fn new(
        tables: Arc<dyn TableGateway>,
        cache: Arc<FallbackCache>,
        monitor: Arc<ConnectionMonitor>,
        changes: ChangeFeed,
    ) -> Self {
        Self {
            tables,
            cache,
            monitor,
            changes,
        }
    }

    pub fn monitor(&self) -> &Arc<ConnectionMonitor> {
        &self.monitor
    }

    pub async fn fetch<R: PortfolioResource>(&self) -> R {
        if !self.monitor.is_online() {
            self.monitor.probe().await;
        }

        let table = R::TABLE.name();
        let result = match self.tables.select(table, R::query(), None).await {
            Ok(rows) => R::from_rows(rows),
            Err(e) => Err(e),
        };

        match result {
            Ok(data) => {
                self.cache.put(data.clone());
                self.monitor.mark_online();
                data
            }
            Err(e) => {
                warn!("Failed to fetch {}, serving cached data: {}", table, e);
                self.monitor.mark_offline(e.describe());
                self.cache.get::<R>()
            }
        }
    }

    pub async fn fetch_projects(&self) -> Vec<Project> {
        self.fetch().await
    }

    pub async fn fetch_testimonials(&self) -> Vec<Testimonial> {
        self.fetch().await
    }

    pub async fn fetch_social_links(&self) -> Vec<SocialLink> {
        self.fetch().await
    }

    pub async fn fetch_personal_info(&self) -> Option<PersonalInfo> {
        self.fetch().await
    }

    /// Probes, then fetches all four resources concurrently.
    pub async fn load_all(&self) -> PortfolioSnapshot {
        self.monitor.probe().await;

        let (projects, testimonials, social_links, personal_info) = tokio::join!(
            self.fetch_projects(),
            self.fetch_testimonials(),
            self.fetch_social_links(),
            self.fetch_personal_info(),
        );

        let status = self.monitor.status();
        PortfolioSnapshot {
            projects,
            testimonials,
            social_links,
            personal_info,
            is_online: status.is_online,
            error: status.last_error,
        }
    }

    pub fn subscribe_projects<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(Vec<Project>) + Send + Sync + 'static,
    {
        self.subscribe(on_change)
    }

    pub fn subscribe_testimonials<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(Vec<Testimonial>) + Send + Sync + 'static,
    {
        self.subscribe(on_change)
    }

    /// Re-fetches `R` after every write to its table and hands the result to
    /// `on_change`. Must be called inside a tokio runtime.
    pub fn subscribe<R, F>(&self, on_change: F) -> Subscription
    where
        R: PortfolioResource,
        F: Fn(R) + Send + Sync + 'static,
    {
        let mut rx = self.changes.subscribe();
        let reader = self.clone();

        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(change) if change.table == R::TABLE => {
                        debug!(table = R::TABLE.name(), kind = ?change.kind, "re-fetching");
                        on_change(reader.fetch::<R>().await);
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Change subscription lagged by {} events", skipped);
                        on_change(reader.fetch::<R>().await);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Subscription { handle }
    }
}

/// Live change subscription; stops when dropped.
#[derive(Debug)]
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    pub fn unsubscribe(self) {}

    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
