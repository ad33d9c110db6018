use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite};
use tower_http::compression::predicate::{DefaultPredicate, Predicate};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libraryboard::{config, db, routes, sources, state::AppState, upstream::JellyfinClient, upstream::MediaServer};

const UI_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/ui");
const UI_INDEX: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/ui/index.html");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging (stdout + daily file rotation under ./logs)
    std::fs::create_dir_all("logs").ok();
    let (stdout_nb, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let file_appender = tracing_appender::rolling::daily("logs", "libraryboard.log");
    let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stdout_nb))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb))
        .init();
    // Guards must outlive the server so the non-blocking writers flush
    let _log_guards = (stdout_guard, file_guard);

    // Load configuration (embedded defaults -> libraryboard.toml -> env/.env)
    let app_cfg = config::load()?;

    let db_url = &app_cfg.database.url;
    config::ensure_sqlite_parent_dir(db_url)?;
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        info!("Creating SQLite database at {}", db_url);
        Sqlite::create_database(db_url).await?;
    }
    let pool = SqlitePoolOptions::new().max_connections(4).connect(db_url).await?;
    db::init_db(&pool).await?;

    let server: Arc<dyn MediaServer> = Arc::new(JellyfinClient::new(&app_cfg.upstream)?);
    info!("Using media server at {}", app_cfg.upstream.base_url);

    let state = AppState::new(pool, server.clone()).await;

    let poller = sources::spawn_task_poller(
        server,
        state.page.live_tasks().clone(),
        Duration::from_millis(app_cfg.polling.tasks_interval_ms),
        state.metrics.clone(),
        state.shutdown.clone(),
    );

    // Static web UI with SPA fallback; prefer <exe_dir>/ui at runtime
    let (ui_root, ui_index) = {
        let runtime_ui = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("ui")))
            .unwrap_or_else(|| std::path::PathBuf::from("ui"));
        let runtime_index = runtime_ui.join("index.html");
        if runtime_ui.is_dir() && runtime_index.is_file() {
            (runtime_ui, runtime_index)
        } else {
            (std::path::PathBuf::from(UI_DIR), std::path::PathBuf::from(UI_INDEX))
        }
    };
    let static_ui_service = ServeDir::new(ui_root)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(ui_index));

    // Compression must not buffer the SSE progress stream
    #[derive(Clone)]
    struct NoSseDefault(DefaultPredicate);
    impl Predicate for NoSseDefault {
        fn should_compress<B: axum::body::HttpBody>(&self, res: &axum::http::Response<B>) -> bool {
            let is_sse = res
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|ct| ct.to_str().ok())
                .is_some_and(|s| s.starts_with("text/event-stream"));
            !is_sse && self.0.should_compress(res)
        }
    }
    let compression = CompressionLayer::new().compress_when(NoSseDefault(DefaultPredicate::new()));

    let shutdown = state.shutdown.clone();
    let app = routes::api_router(state)
        .fallback_service(static_ui_service)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // CORS: permissive in debug builds (UI dev server on another port)
    let app = if cfg!(debug_assertions) { app.layer(CorsLayer::permissive()) } else { app };

    let port: u16 = app_cfg.server.port;
    let host: String = app_cfg.server.host.clone();
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen addr {}:{} - {}", host, port, e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Libraryboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal(shutdown)).await?;

    let _ = poller.await;
    Ok(())
}

// Cancelling the token stops the poller and ends open SSE streams
async fn shutdown_signal(shutdown: CancellationToken) {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received. Stopping server...");
    shutdown.cancel();
}
