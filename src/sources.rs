//! Cached remote reads: the folder listing and the live-task list.
//!
//! Each read carries a pending/ready flag. The folder listing is fetched on
//! demand and refetched after invalidation; live tasks are refreshed by a
//! background poller that also pushes refresh-task snapshots to subscribers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::metrics::Metrics;
use crate::tasks::find_refresh_task;
use crate::types::{LiveTask, RefreshTaskEvent, VirtualFolder};
use crate::upstream::MediaServer;

/// Cache key of the folder listing.
pub const VIRTUAL_FOLDERS_KEY: &str = "VirtualFolders";

#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    Pending,
    Ready(T),
}

impl<T> Remote<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Remote::Ready(v) => Some(v),
            Remote::Pending => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Remote::Pending)
    }
}

pub struct FolderListing {
    state: RwLock<Remote<Arc<Vec<VirtualFolder>>>>,
    stale: AtomicBool,
    revision: AtomicU64,
}

impl FolderListing {
    pub fn new() -> Self {
        Self { state: RwLock::new(Remote::Pending), stale: AtomicBool::new(false), revision: AtomicU64::new(0) }
    }

    pub async fn current(&self) -> Remote<Arc<Vec<VirtualFolder>>> {
        self.state.read().await.clone()
    }

    /// Bumped on every successful store; used to memoize derived views.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// True when the next read should go to the media server.
    pub async fn needs_fetch(&self) -> bool {
        self.stale.load(Ordering::Acquire) || self.state.read().await.is_pending()
    }

    pub async fn store(&self, folders: Vec<VirtualFolder>) -> Arc<Vec<VirtualFolder>> {
        let folders = Arc::new(folders);
        *self.state.write().await = Remote::Ready(folders.clone());
        self.stale.store(false, Ordering::Release);
        self.revision.fetch_add(1, Ordering::AcqRel);
        folders
    }

    /// Keeps the current data visible but forces a refetch on the next read.
    pub fn invalidate(&self) {
        self.stale.store(true, Ordering::Release);
    }
}

impl Default for FolderListing {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LiveTasks {
    state: RwLock<Remote<Arc<Vec<LiveTask>>>>,
    events: broadcast::Sender<RefreshTaskEvent>,
}

impl LiveTasks {
    pub fn new() -> Self {
        let (events, _rx) = broadcast::channel(64);
        Self { state: RwLock::new(Remote::Pending), events }
    }

    pub async fn current(&self) -> Remote<Arc<Vec<LiveTask>>> {
        self.state.read().await.clone()
    }

    pub async fn store(&self, tasks: Vec<LiveTask>) {
        let event = match find_refresh_task(&tasks) {
            Some(t) => RefreshTaskEvent::Snapshot {
                task_id: t.id.clone(),
                state: t.state,
                progress: t.current_progress_percentage,
            },
            None => RefreshTaskEvent::Missing,
        };
        *self.state.write().await = Remote::Ready(Arc::new(tasks));
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RefreshTaskEvent> {
        self.events.subscribe()
    }
}

impl Default for LiveTasks {
    fn default() -> Self {
        Self::new()
    }
}

/// Polls the scheduler until `cancel` fires. The first poll runs immediately.
pub fn spawn_task_poller(
    server: Arc<dyn MediaServer>,
    tasks: Arc<LiveTasks>,
    interval: Duration,
    metrics: Metrics,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Task poller stopped");
                    break;
                }
                _ = ticker.tick() => {
                    metrics.inc_task_polls();
                    match server.live_tasks().await {
                        Ok(list) => tasks.store(list).await,
                        Err(e) => {
                            metrics.inc_task_poll_failures();
                            tracing::warn!("Polling live tasks failed: {}", e);
                        }
                    }
                }
            }
        }
    })
}
