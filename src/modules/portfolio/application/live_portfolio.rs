//! The process-wide portfolio view served to the site.
//!
//! One [`AutoRefresh`] keeps the full snapshot fresh on its own schedule,
//! and change subscriptions patch the project and testimonial lists as soon
//! as an admin write lands.

use std::sync::{Arc, Weak};

use crate::modules::portfolio::application::auto_refresh::{AutoRefresh, RefreshOptions};
use crate::modules::portfolio::application::portfolio_reader::{
    PortfolioReader, PortfolioSnapshot, Subscription,
};
use crate::modules::portfolio::domain::entities::{Project, Testimonial};

#[derive(Clone)]
pub struct LivePortfolio {
    reader: PortfolioReader,
    view: Arc<AutoRefresh<PortfolioSnapshot>>,
    _subscriptions: Arc<Vec<Subscription>>,
}

impl LivePortfolio {
    /// Must be called inside a tokio runtime.
    pub fn mount(reader: PortfolioReader, options: RefreshOptions) -> Self {
        let loader = reader.clone();
        let view = Arc::new(AutoRefresh::mount(
            move || {
                let reader = loader.clone();
                async move { reader.load_all().await }
            },
            PortfolioSnapshot::empty(),
            options,
        ));

        let subscriptions = vec![
            reader.subscribe_projects(patch(
                &reader,
                &view,
                |snapshot: &mut PortfolioSnapshot, projects: Vec<Project>| {
                    snapshot.projects = projects
                },
            )),
            reader.subscribe_testimonials(patch(
                &reader,
                &view,
                |snapshot: &mut PortfolioSnapshot, testimonials: Vec<Testimonial>| {
                    snapshot.testimonials = testimonials
                },
            )),
        ];

        Self {
            reader,
            view,
            _subscriptions: Arc::new(subscriptions),
        }
    }

    pub fn reader(&self) -> &PortfolioReader {
        &self.reader
    }

    pub fn view(&self) -> &AutoRefresh<PortfolioSnapshot> {
        &self.view
    }
}

/// Builds a subscription callback that writes fresh rows into the view.
/// Holds the view weakly so a dropped view is not kept alive by its own
/// subscriptions.
fn patch<R, F>(
    reader: &PortfolioReader,
    view: &Arc<AutoRefresh<PortfolioSnapshot>>,
    apply: F,
) -> impl Fn(R) + Send + Sync + 'static
where
    R: Send + 'static,
    F: Fn(&mut PortfolioSnapshot, R) + Send + Sync + 'static,
{
    let weak: Weak<AutoRefresh<PortfolioSnapshot>> = Arc::downgrade(view);
    let monitor = Arc::clone(reader.monitor());
    move |rows: R| {
        let Some(view) = weak.upgrade() else {
            return;
        };
        let status = monitor.status();
        view.replace(|snapshot| {
            apply(snapshot, rows);
            snapshot.is_online = status.is_online;
            snapshot.error = status.last_error;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    use crate::modules::portfolio::application::auto_refresh::RefreshState;
    use crate::modules::portfolio::application::change_feed::{ChangeFeed, ChangeKind};
    use crate::modules::portfolio::application::connection_monitor::ConnectionMonitor;
    use crate::modules::portfolio::application::fallback_cache::FallbackCache;
    use crate::modules::portfolio::domain::entities::Table;
    use crate::tests::support::in_memory_backend::InMemoryBackend;

    fn live(backend: &Arc<InMemoryBackend>, changes: &ChangeFeed) -> LivePortfolio {
        let monitor = Arc::new(ConnectionMonitor::new(
            backend.clone(),
            backend.clone(),
            "bucket",
        ));
        let reader = PortfolioReader::new(
            backend.clone(),
            Arc::new(FallbackCache::new()),
            monitor,
            changes.clone(),
        );
        LivePortfolio::mount(
            reader,
            RefreshOptions {
                interval: None,
                ..RefreshOptions::default()
            },
        )
    }

    async fn wait_for<F>(portfolio: &LivePortfolio, done: F)
    where
        F: Fn(&RefreshState<PortfolioSnapshot>) -> bool,
    {
        let mut rx = portfolio.view().subscribe();
        tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|s| done(s)))
            .await
            .expect("view never reached the expected state")
            .unwrap();
    }

    #[tokio::test]
    async fn mount_loads_the_full_snapshot() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.seed(
            "projects",
            vec![json!({"name": "Atlas", "description": "Maps"})],
        );
        backend.seed(
            "social_links",
            vec![json!({"platform": "GitHub", "url": "https://github.com/x"})],
        );

        let portfolio = live(&backend, &ChangeFeed::default());
        wait_for(&portfolio, |s| !s.data.projects.is_empty()).await;

        let state = portfolio.view().state();
        assert_eq!(state.refresh_count, 1);
        assert_eq!(state.data.projects[0].name, "Atlas");
        assert_eq!(state.data.social_links.len(), 1);
        assert!(state.data.is_online);
    }

    #[tokio::test]
    async fn project_writes_patch_the_view_without_a_full_refresh() {
        let backend = Arc::new(InMemoryBackend::new());
        let changes = ChangeFeed::default();
        let portfolio = live(&backend, &changes);
        wait_for(&portfolio, |s| s.refresh_count == 1).await;

        backend.seed(
            "projects",
            vec![json!({"name": "Beacon", "description": "Signals"})],
        );
        changes.publish(Table::Projects, ChangeKind::Insert);
        wait_for(&portfolio, |s| s.data.projects.len() == 1).await;

        let state = portfolio.view().state();
        assert_eq!(state.data.projects[0].name, "Beacon");
        assert_eq!(state.refresh_count, 1);
    }
}
