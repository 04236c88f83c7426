//! Keeps one view's data fresh.
//!
//! Every trigger (mount, interval tick, visibility or focus regained,
//! manual) goes through a single channel drained by one loop, so refresh
//! cycles never overlap. A trigger that arrives less than `cooldown` after
//! the previous completed refresh is dropped.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::debug;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTrigger {
    Mount,
    Interval,
    VisibilityRegained,
    FocusRegained,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPhase {
    Idle,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOptions {
    /// `None` disables the timer.
    pub interval: Option<Duration>,
    pub cooldown: Duration,
    pub refresh_on_visibility: bool,
    pub refresh_on_focus: bool,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            interval: Some(Duration::from_secs(30)),
            cooldown: Duration::from_secs(5),
            refresh_on_visibility: true,
            refresh_on_focus: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshState<T> {
    pub data: T,
    pub phase: RefreshPhase,
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub refresh_count: u64,
}

/// Handle to a mounted view. Dropping it unmounts the view.
pub struct AutoRefresh<T> {
    triggers: mpsc::UnboundedSender<RefreshTrigger>,
    state: Arc<watch::Sender<RefreshState<T>>>,
    mounted: Arc<AtomicBool>,
    options: RefreshOptions,
}

impl<T> AutoRefresh<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawns the refresh loop and queues the initial `Mount` load.
    pub fn mount<F, Fut>(fetch: F, initial: T, options: RefreshOptions) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (triggers, rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(RefreshState {
            data: initial,
            phase: RefreshPhase::Idle,
            last_refreshed_at: None,
            refresh_count: 0,
        });
        let state = Arc::new(state_tx);
        let mounted = Arc::new(AtomicBool::new(true));

        tokio::spawn(run_loop(
            fetch,
            rx,
            Arc::clone(&state),
            Arc::clone(&mounted),
            options.clone(),
        ));

        let _ = triggers.send(RefreshTrigger::Mount);

        Self {
            triggers,
            state,
            mounted,
            options,
        }
    }

    /// Queues a refresh request. Returns `false` if this kind of trigger is
    /// disabled for the view or the loop has stopped. Acceptance into the
    /// queue does not bypass the cooldown.
    pub fn trigger(&self, trigger: RefreshTrigger) -> bool {
        let enabled = match trigger {
            RefreshTrigger::VisibilityRegained => self.options.refresh_on_visibility,
            RefreshTrigger::FocusRegained => self.options.refresh_on_focus,
            _ => true,
        };
        enabled && self.triggers.send(trigger).is_ok()
    }

    pub fn refresh(&self) -> bool {
        self.trigger(RefreshTrigger::Manual)
    }

    pub fn visibility_regained(&self) -> bool {
        self.trigger(RefreshTrigger::VisibilityRegained)
    }

    pub fn focus_regained(&self) -> bool {
        self.trigger(RefreshTrigger::FocusRegained)
    }

    pub fn state(&self) -> RefreshState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RefreshState<T>> {
        self.state.subscribe()
    }

    /// Patches the view data in place; no refetch, no cooldown.
    pub fn replace<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.state.send_modify(|state| f(&mut state.data));
    }

    pub fn options(&self) -> &RefreshOptions {
        &self.options
    }
}

impl<T> Drop for AutoRefresh<T> {
    fn drop(&mut self) {
        self.mounted.store(false, Ordering::Release);
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

async fn run_loop<T, F, Fut>(
    fetch: F,
    mut triggers: mpsc::UnboundedReceiver<RefreshTrigger>,
    state: Arc<watch::Sender<RefreshState<T>>>,
    mounted: Arc<AtomicBool>,
    options: RefreshOptions,
) where
    F: Fn() -> Fut,
    Fut: Future<Output = T>,
{
    let mut ticker = options.interval.map(|period| {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval
    });
    let mut last_completed: Option<Instant> = None;

    loop {
        let trigger = tokio::select! {
            received = triggers.recv() => match received {
                Some(trigger) => trigger,
                None => break,
            },
            _ = next_tick(&mut ticker) => RefreshTrigger::Interval,
        };

        if !mounted.load(Ordering::Acquire) {
            break;
        }

        if let Some(at) = last_completed {
            if at.elapsed() < options.cooldown {
                debug!(?trigger, "refresh dropped: cooldown");
                continue;
            }
        }

        debug!(?trigger, "refreshing");
        state.send_modify(|s| s.phase = RefreshPhase::Loading);

        let data = fetch().await;

        // Unmounted mid-flight: the result has nowhere to go.
        if !mounted.load(Ordering::Acquire) {
            break;
        }

        last_completed = Some(Instant::now());
        state.send_modify(|s| {
            s.data = data;
            s.phase = RefreshPhase::Idle;
            s.last_refreshed_at = Some(Utc::now());
            s.refresh_count += 1;
        });
    }

    debug!("refresh loop stopped");
}
