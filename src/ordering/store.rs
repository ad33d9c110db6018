//! Persistence of the library order.
//!
//! The order is the `libraryOrder` field of a JSON settings object. Stores only
//! ever touch that field; anything else in the object is carried through.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{Row, SqlitePool};
use tokio::sync::RwLock;

/// Field holding the order inside the settings object.
pub const ORDER_FIELD: &str = "libraryOrder";
/// Row of the `settings` table that holds the dashboard settings object.
pub const SETTINGS_KEY: &str = "dashboard";

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// The persisted order, or empty when none was ever set.
    async fn get_order(&self) -> Vec<String>;

    /// Replaces the persisted order in one write.
    async fn set_order(&self, order: &[String]) -> anyhow::Result<()>;
}

fn order_from_settings(settings: &Value) -> Vec<String> {
    settings
        .get(ORDER_FIELD)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_owned)).collect())
        .unwrap_or_default()
}

fn with_order(settings: Value, order: &[String]) -> Value {
    let mut obj = match settings {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    obj.insert(ORDER_FIELD.to_string(), Value::from(order.to_vec()));
    Value::Object(obj)
}

/// Order store backed by the `settings` table.
#[derive(Clone)]
pub struct SqliteOrderStore {
    db: SqlitePool,
}

impl SqliteOrderStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    async fn load_settings(&self) -> anyhow::Result<Option<Value>> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?1")
            .bind(SETTINGS_KEY)
            .fetch_optional(&self.db)
            .await?;
        match row {
            Some(row) => {
                let raw: String = row.get("value");
                Ok(Some(serde_json::from_str(&raw)?))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    async fn get_order(&self) -> Vec<String> {
        match self.load_settings().await {
            Ok(Some(settings)) => order_from_settings(&settings),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read library order, treating as unset: {}", e);
                Vec::new()
            }
        }
    }

    async fn set_order(&self, order: &[String]) -> anyhow::Result<()> {
        let mut tx = self.db.begin().await?;

        let existing: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
            .bind(SETTINGS_KEY)
            .fetch_optional(&mut *tx)
            .await?;
        let settings = match existing {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Discarding unreadable dashboard settings: {}", e);
                Value::Object(Map::new())
            }),
            None => Value::Object(Map::new()),
        };
        let updated = serde_json::to_string(&with_order(settings, order))?;

        sqlx::query(
            r#"INSERT INTO settings (key, value, updated_at)
               VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%SZ','now'))
               ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(SETTINGS_KEY)
        .bind(updated)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

/// In-process order store.
#[derive(Default)]
pub struct MemoryOrderStore {
    settings: RwLock<Value>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self { settings: RwLock::new(Value::Object(Map::new())) }
    }

    /// Starts from an existing settings object.
    pub fn with_settings(settings: Value) -> Self {
        Self { settings: RwLock::new(settings) }
    }

    pub async fn settings(&self) -> Value {
        self.settings.read().await.clone()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn get_order(&self) -> Vec<String> {
        order_from_settings(&*self.settings.read().await)
    }

    async fn set_order(&self, order: &[String]) -> anyhow::Result<()> {
        let mut guard = self.settings.write().await;
        let current = std::mem::take(&mut *guard);
        *guard = with_order(current, order);
        Ok(())
    }
}
