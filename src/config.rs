use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Connection to the media server that owns libraries and scheduled tasks.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Sent as `X-Emby-Token`. Empty means unauthenticated.
    #[serde(default)]
    pub api_key: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    pub tasks_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        let defaults: &str = include_str!("../config/default.toml");
        match ::config::Config::builder()
            .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => {
                    eprintln!("FATAL: Failed to deserialize default config: {}", e);
                    panic!("Failed to deserialize default config: {}", e);
                }
            },
            Err(e) => {
                eprintln!("FATAL: Failed to parse default config: {}", e);
                panic!("Failed to parse default config: {}", e);
            }
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        // Mirror defaults from config/default.toml
        Self { tasks_interval_ms: 1500 }
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let defaults: &str = include_str!("../config/default.toml");
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
        // Optional local file: libraryboard.toml (in CWD)
        .add_source(::config::File::with_name("libraryboard").required(false));

    if let Ok(custom_path) = std::env::var("LIBRARYBOARD_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("LIBRARYBOARD").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    // Server
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }

    // Upstream
    let base = cfg.upstream.base_url.trim();
    if base.is_empty() {
        return Err(anyhow::anyhow!("upstream.base_url must not be empty"));
    }
    if !base.starts_with("http://") && !base.starts_with("https://") {
        return Err(anyhow::anyhow!("upstream.base_url must be an http(s) URL, got {}", base));
    }
    if cfg.upstream.timeout_ms == 0 {
        return Err(anyhow::anyhow!("upstream.timeout_ms must be > 0"));
    }
    if cfg.upstream.api_key.is_empty() {
        tracing::warn!("upstream.api_key is empty - requests to the media server are unauthenticated");
    }

    // Polling
    if cfg.polling.tasks_interval_ms < 100 {
        return Err(anyhow::anyhow!("polling.tasks_interval_ms must be >= 100"));
    }

    Ok(())
}

pub fn ensure_sqlite_parent_dir(url: &str) -> anyhow::Result<()> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        // sqlite:///C:/... on Windows: drop the leading '/' before a drive letter
        #[cfg(windows)]
        let path = {
            let bytes = path.as_bytes();
            if bytes.len() >= 3 && bytes[0] == b'/' && bytes[2] == b':' && bytes[1].is_ascii_alphabetic() {
                &path[1..]
            } else {
                path
            }
        };
        let p = Path::new(path);
        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
