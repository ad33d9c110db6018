use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::controller::LibrariesPage;
use crate::metrics::Metrics;
use crate::ordering::{OrderStore, SqliteOrderStore};
use crate::sources::{FolderListing, LiveTasks};
use crate::upstream::MediaServer;

/// The shared application state.
///
/// Cloned into every handler by axum; everything inside is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Settings database (library order).
    pub db: sqlx::SqlitePool,
    pub metrics: Metrics,
    /// The libraries page, shared by all clients.
    pub page: Arc<LibrariesPage>,
    /// Stops background work on shutdown.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Wires the page to the SQLite order store and the given media server.
    ///
    /// The task poller is not started here; see
    /// [`crate::sources::spawn_task_poller`].
    pub async fn new(db: sqlx::SqlitePool, server: Arc<dyn MediaServer>) -> Self {
        let store: Arc<dyn OrderStore> = Arc::new(SqliteOrderStore::new(db.clone()));
        Self::with_store(db, server, store).await
    }

    pub async fn with_store(
        db: sqlx::SqlitePool,
        server: Arc<dyn MediaServer>,
        store: Arc<dyn OrderStore>,
    ) -> Self {
        let metrics = Metrics::new();
        let page = LibrariesPage::new(
            store,
            server,
            Arc::new(FolderListing::new()),
            Arc::new(LiveTasks::new()),
            metrics.clone(),
        )
        .await;

        Self {
            db,
            metrics,
            page: Arc::new(page),
            shutdown: CancellationToken::new(),
        }
    }
}
