//! Per-session dashboard state.
//!
//! Each activation of the dashboard takes a new generation number. Only the
//! newest generation may commit its result, so a slow load that finishes
//! after a newer one never overwrites it.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::service::{DashboardLoad, aggregate_stats};
use super::source::DashboardSource;

#[derive(Debug, Clone, PartialEq)]
pub struct CommittedStats {
    pub generation: u64,
    pub load: DashboardLoad,
    pub loaded_at: DateTime<Utc>,
}

/// Outcome of a single activation.
#[derive(Debug, Clone)]
pub struct Activation {
    pub generation: u64,
    pub committed: bool,
    /// What the view shows after this activation: its own result, or a
    /// newer committed one when this activation went stale.
    pub displayed: CommittedStats,
}

#[derive(Debug, Default)]
pub struct DashboardView {
    generation: AtomicU64,
    snapshot: Mutex<Option<CommittedStats>>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new activation and returns its generation.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Stores `load` if `generation` is still the newest activation.
    pub async fn commit(&self, generation: u64, load: DashboardLoad) -> Activation {
        let mut snapshot = self.snapshot.lock().await;
        let own = CommittedStats {
            generation,
            load,
            loaded_at: Utc::now(),
        };

        if generation == self.latest_generation() {
            *snapshot = Some(own.clone());
            return Activation {
                generation,
                committed: true,
                displayed: own,
            };
        }

        debug!(generation, latest = self.latest_generation(), "discarding stale dashboard load");
        let displayed = match snapshot.as_ref() {
            Some(newer) if newer.generation > generation => newer.clone(),
            _ => own,
        };
        Activation {
            generation,
            committed: false,
            displayed,
        }
    }

    pub async fn snapshot(&self) -> Option<CommittedStats> {
        self.snapshot.lock().await.clone()
    }

    /// Loads fresh statistics for `today` and commits them unless a newer
    /// activation started meanwhile.
    pub async fn activate<S: DashboardSource>(&self, source: &S, today: NaiveDate) -> Activation {
        let generation = self.begin();
        let load = aggregate_stats(source, today).await;
        self.commit(generation, load).await
    }
}

#[derive(Debug)]
struct ViewEntry {
    view: Arc<DashboardView>,
    expires_at: DateTime<Utc>,
}

/// Dashboard views keyed by session. Dropped on sign-out, and swept once the
/// session's token has expired.
#[derive(Debug, Clone, Default)]
pub struct DashboardViews {
    views: Arc<RwLock<HashMap<Uuid, ViewEntry>>>,
}

impl DashboardViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn view_for(
        &self,
        session_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Arc<DashboardView> {
        if let Some(entry) = self.views.read().await.get(&session_id) {
            return entry.view.clone();
        }

        let mut views = self.views.write().await;
        let swept = sweep_expired(&mut views, Utc::now());
        if swept > 0 {
            debug!(swept, "dropped dashboard views of expired sessions");
        }
        views
            .entry(session_id)
            .or_insert_with(|| ViewEntry {
                view: Arc::new(DashboardView::new()),
                expires_at,
            })
            .view
            .clone()
    }

    /// Drops every view whose session expired at or before `now`.
    pub async fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        sweep_expired(&mut *self.views.write().await, now)
    }

    /// Sweeps expired views on a fixed interval until the runtime shuts down.
    pub fn spawn_sweeper(&self, every: std::time::Duration) {
        let views = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(every).await;
                let swept = views.prune_expired(Utc::now()).await;
                if swept > 0 {
                    debug!(swept, "dropped dashboard views of expired sessions");
                }
            }
        });
    }

    pub async fn teardown(&self, session_id: Uuid) -> bool {
        self.views.write().await.remove(&session_id).is_some()
    }

    pub async fn active_count(&self) -> usize {
        self.views.read().await.len()
    }
}

fn sweep_expired(views: &mut HashMap<Uuid, ViewEntry>, now: DateTime<Utc>) -> usize {
    let before = views.len();
    views.retain(|_, entry| entry.expires_at > now);
    before - views.len()
}
