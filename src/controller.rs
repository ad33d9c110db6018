//! The "Libraries" admin page.
//!
//! [`LibrariesPage`] owns the working copy of the library order, composes it
//! with the folder listing and live tasks, and dispatches the page actions.
//! The sorted grid is derived on demand and memoized on the revisions of its
//! two inputs.

use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;

use crate::metrics::Metrics;
use crate::ordering::{self, OrderStore};
use crate::sources::{FolderListing, LiveTasks, VIRTUAL_FOLDERS_KEY};
use crate::tasks::{find_refresh_task, is_running};
use crate::types::{
    CreateLibraryRequest, LibrariesView, LiveTask, MoveDirection, PageView, ReorderEntry, ScanControl, ScanOutcome,
    VirtualFolder,
};
use crate::upstream::MediaServer;

struct OrderState {
    names: Vec<String>,
    revision: u64,
}

struct SortMemo {
    folders_rev: u64,
    order_rev: u64,
    sorted: Arc<Vec<VirtualFolder>>,
}

pub struct LibrariesPage {
    store: Arc<dyn OrderStore>,
    server: Arc<dyn MediaServer>,
    folders: Arc<FolderListing>,
    tasks: Arc<LiveTasks>,
    metrics: Metrics,
    order: Mutex<OrderState>,
    memo: StdMutex<Option<SortMemo>>,
}

impl LibrariesPage {
    /// Builds the page with the order currently in `store`.
    pub async fn new(
        store: Arc<dyn OrderStore>,
        server: Arc<dyn MediaServer>,
        folders: Arc<FolderListing>,
        tasks: Arc<LiveTasks>,
        metrics: Metrics,
    ) -> Self {
        let names = store.get_order().await;
        Self {
            store,
            server,
            folders,
            tasks,
            metrics,
            order: Mutex::new(OrderState { names, revision: 0 }),
            memo: StdMutex::new(None),
        }
    }

    pub fn live_tasks(&self) -> &Arc<LiveTasks> {
        &self.tasks
    }

    pub async fn order(&self) -> Vec<String> {
        self.order.lock().await.names.clone()
    }

    /// Fetches the folder listing when it is pending or invalidated.
    ///
    /// A failed fetch leaves the previous state in place.
    pub async fn refresh_folders(&self) {
        if !self.folders.needs_fetch().await {
            return;
        }
        match self.server.virtual_folders().await {
            Ok(list) => {
                let folders = self.folders.store(list).await;
                self.on_folders_received(&folders).await;
            }
            Err(e) => {
                self.metrics.inc_folder_fetch_failures();
                tracing::warn!("Fetching virtual folders failed: {}", e);
            }
        }
    }

    /// Seeds the order from the received libraries when nothing is stored yet.
    pub async fn on_folders_received(&self, folders: &[VirtualFolder]) {
        let mut order = self.order.lock().await;
        let Some(seed) = ordering::seed_if_empty(&order.names, folders) else {
            return;
        };
        tracing::info!("Initializing library order with {} libraries", seed.len());
        if let Err(e) = self.store.set_order(&seed).await {
            tracing::warn!("Persisting initial library order failed: {}", e);
        }
        order.names = seed;
        order.revision += 1;
    }

    pub async fn view(&self) -> PageView {
        self.refresh_folders().await;

        let folders_rev = self.folders.revision();
        let folders = self.folders.current().await;
        let tasks = self.tasks.current().await;
        let (Some(folders), Some(tasks)) = (folders.ready(), tasks.ready()) else {
            return PageView::Loading;
        };

        let (names, order_rev) = {
            let order = self.order.lock().await;
            (order.names.clone(), order.revision)
        };
        let libraries = self.sorted_libraries(folders_rev, folders, order_rev, &names);

        PageView::Ready(LibrariesView {
            libraries: libraries.as_ref().clone(),
            order: reorder_entries(&ordering::effective_order(&names, folders)),
            scan: scan_control(find_refresh_task(tasks)),
        })
    }

    fn sorted_libraries(
        &self,
        folders_rev: u64,
        folders: &[VirtualFolder],
        order_rev: u64,
        names: &[String],
    ) -> Arc<Vec<VirtualFolder>> {
        let Ok(mut memo) = self.memo.lock() else {
            return Arc::new(ordering::sort_by_order(folders, names));
        };
        if let Some(m) = memo.as_ref() {
            if m.folders_rev == folders_rev && m.order_rev == order_rev {
                return m.sorted.clone();
            }
        }
        let sorted = Arc::new(ordering::sort_by_order(folders, names));
        *memo = Some(SortMemo { folders_rev, order_rev, sorted: sorted.clone() });
        sorted
    }

    /// Moves `name` one step and persists the result.
    ///
    /// The move applies to the effective order, so libraries the stored order
    /// does not list yet are written along with it. Unknown names and boundary
    /// moves leave the order untouched. On a persistence failure the working
    /// order is not changed either.
    pub async fn move_library(&self, name: &str, direction: MoveDirection) -> anyhow::Result<Vec<String>> {
        let mut order = self.order.lock().await;
        let current = match self.folders.current().await.ready() {
            Some(folders) => ordering::effective_order(&order.names, folders),
            None => order.names.clone(),
        };
        let next = ordering::move_entry(&current, name, direction);
        if next == current {
            tracing::debug!("Ignoring move of {:?} {:?}: nothing to do", name, direction);
            return Ok(next);
        }
        self.store.set_order(&next).await?;
        self.metrics.inc_order_moves();
        tracing::info!("Moved library {:?} {:?}", name, direction);
        order.names = next.clone();
        order.revision += 1;
        Ok(next)
    }

    /// Overwrites the whole order.
    pub async fn replace_order(&self, names: Vec<String>) -> anyhow::Result<Vec<String>> {
        let mut order = self.order.lock().await;
        self.store.set_order(&names).await?;
        tracing::info!("Library order replaced ({} entries)", names.len());
        order.names = names.clone();
        order.revision += 1;
        Ok(names)
    }

    /// Starts the refresh task without waiting for the media server.
    pub async fn scan_all(&self) -> ScanOutcome {
        let tasks = self.tasks.current().await;
        let Some(task) = tasks.ready().and_then(|t| find_refresh_task(t)) else {
            self.metrics.inc_scans_skipped();
            tracing::debug!("Scan requested but no refresh task is known");
            return ScanOutcome::Skipped;
        };

        let task_id = task.id.clone();
        let server = self.server.clone();
        let id = task_id.clone();
        tokio::spawn(async move {
            if let Err(e) = server.start_task(&id).await {
                tracing::warn!("Starting task {} failed: {}", id, e);
            }
        });
        self.metrics.inc_scans_requested();
        tracing::info!("Requested library scan (task {})", task_id);
        ScanOutcome::Requested { task_id }
    }

    /// Runs the create-library workflow. Returns whether anything changed.
    pub async fn add_library(&self, req: &CreateLibraryRequest) -> bool {
        match self.server.add_virtual_folder(req).await {
            Ok(()) => {
                self.metrics.inc_libraries_added();
                tracing::info!("Library {:?} created", req.name);
                self.invalidate(VIRTUAL_FOLDERS_KEY);
                true
            }
            Err(e) => {
                tracing::warn!("Creating library {:?} failed: {}", req.name, e);
                false
            }
        }
    }

    /// Invalidates a cached remote read by key.
    pub fn invalidate(&self, key: &str) {
        if key == VIRTUAL_FOLDERS_KEY {
            self.folders.invalidate();
        } else {
            tracing::debug!("No cached query under key {:?}", key);
        }
    }
}

fn reorder_entries(names: &[String]) -> Vec<ReorderEntry> {
    let last = names.len().saturating_sub(1);
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| ReorderEntry { name: name.clone(), can_move_up: idx > 0, can_move_down: idx < last })
        .collect()
}

fn scan_control(task: Option<&LiveTask>) -> ScanControl {
    match task {
        Some(t) => {
            let busy = is_running(t);
            ScanControl {
                task_id: Some(t.id.clone()),
                enabled: true,
                busy,
                progress: if busy { t.current_progress_percentage } else { None },
            }
        }
        None => ScanControl { task_id: None, enabled: false, busy: false, progress: None },
    }
}
