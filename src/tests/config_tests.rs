#[cfg(test)]
mod tests {
    use crate::config::{self, AppConfig, PollingConfig};

    #[test]
    fn test_embedded_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.url, "sqlite://data/libraryboard.db");
        assert_eq!(cfg.upstream.base_url, "http://127.0.0.1:8096");
        assert!(cfg.upstream.api_key.is_empty());
        assert_eq!(cfg.upstream.timeout_ms, 10000);
        assert_eq!(cfg.polling.tasks_interval_ms, PollingConfig::default().tasks_interval_ms);
        assert!(config::validate(&cfg).is_ok());
    }

    #[test]
    fn test_rejects_zero_port() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(config::validate(&cfg).is_err());
    }

    #[test]
    fn test_rejects_bad_upstream_url() {
        let mut cfg = AppConfig::default();
        cfg.upstream.base_url = "   ".into();
        assert!(config::validate(&cfg).is_err());

        cfg.upstream.base_url = "ftp://media.local".into();
        let err = config::validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("http(s)"));

        cfg.upstream.base_url = "https://media.local/jellyfin/".into();
        assert!(config::validate(&cfg).is_ok());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut cfg = AppConfig::default();
        cfg.upstream.timeout_ms = 0;
        assert!(config::validate(&cfg).is_err());
    }

    #[test]
    fn test_rejects_tight_polling() {
        let mut cfg = AppConfig::default();
        cfg.polling.tasks_interval_ms = 50;
        assert!(config::validate(&cfg).is_err());
        cfg.polling.tasks_interval_ms = 100;
        assert!(config::validate(&cfg).is_ok());
    }

    #[test]
    fn test_ensure_sqlite_parent_dir_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("deeper").join("board.db");
        let url = format!("sqlite://{}", db_path.display());

        config::ensure_sqlite_parent_dir(&url).unwrap();
        assert!(db_path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_ensure_sqlite_parent_dir_ignores_other_schemes() {
        assert!(config::ensure_sqlite_parent_dir("postgres://localhost/db").is_ok());
    }
}
