use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::types::{CreateLibraryRequest, LiveTask, TaskState, VirtualFolder};
use crate::upstream::{MediaServer, UpstreamError, UpstreamResult};

/// In-memory media server recording every call.
#[derive(Default)]
pub struct FakeMediaServer {
    pub folders: Mutex<Vec<VirtualFolder>>,
    pub tasks: Mutex<Vec<LiveTask>>,
    pub started: Mutex<Vec<String>>,
    pub created: Mutex<Vec<String>>,
    pub fail_folders: AtomicBool,
    pub fail_create: AtomicBool,
    pub folder_fetches: AtomicUsize,
}

impl FakeMediaServer {
    pub fn with_libraries(names: &[&str]) -> Self {
        let server = Self::default();
        server.set_libraries(names);
        server
    }

    pub fn set_libraries(&self, names: &[&str]) {
        *self.folders.lock().unwrap() = folders(names);
    }

    pub fn started(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    /// Waits for the fire-and-forget start request to land.
    pub async fn wait_for_start(&self) -> Vec<String> {
        for _ in 0..100 {
            let started = self.started();
            if !started.is_empty() {
                return started;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.started()
    }
}

#[async_trait]
impl MediaServer for FakeMediaServer {
    async fn virtual_folders(&self) -> UpstreamResult<Vec<VirtualFolder>> {
        self.folder_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_folders.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status { status: 503, endpoint: "/Library/VirtualFolders".into() });
        }
        Ok(self.folders.lock().unwrap().clone())
    }

    async fn live_tasks(&self) -> UpstreamResult<Vec<LiveTask>> {
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn start_task(&self, task_id: &str) -> UpstreamResult<()> {
        self.started.lock().unwrap().push(task_id.to_string());
        Ok(())
    }

    async fn add_virtual_folder(&self, req: &CreateLibraryRequest) -> UpstreamResult<()> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status { status: 400, endpoint: "/Library/VirtualFolders".into() });
        }
        self.created.lock().unwrap().push(req.name.clone());
        let id = format!("id-{}", req.name);
        self.folders.lock().unwrap().push(VirtualFolder::new(req.name.clone(), id));
        Ok(())
    }
}

pub fn folders(names: &[&str]) -> Vec<VirtualFolder> {
    names.iter().map(|n| VirtualFolder::new(*n, format!("id-{}", n))).collect()
}

pub fn names(libs: &[VirtualFolder]) -> Vec<String> {
    libs.iter().map(|l| l.name.clone()).collect()
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn task(id: &str, key: &str, state: TaskState, progress: Option<f64>) -> LiveTask {
    LiveTask {
        id: id.to_string(),
        key: key.to_string(),
        name: key.to_string(),
        state,
        current_progress_percentage: progress,
    }
}

/// A settings database in a temp dir; keep the `TempDir` alive for the test.
pub async fn setup_test_db() -> (SqlitePool, TempDir) {
    let dir = TempDir::new().unwrap();
    let options = SqliteConnectOptions::new().filename(dir.path().join("test.db")).create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(1).connect_with(options).await.unwrap();
    crate::db::init_db(&pool).await.unwrap();
    (pool, dir)
}
