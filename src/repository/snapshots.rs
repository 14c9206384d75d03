//! Snapshot persistence
//!
//! Every aggregate is persisted as one JSON list under a fixed settings field
//! name. Saves are queued to a single writer task so they land in the order
//! the stores produced them, without the caller waiting on the sink.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use sqlx::{Pool, Postgres};
use tokio::sync::{mpsc, oneshot, RwLock};

use crate::error::AppResult;

pub const MATERIAL_REQUESTS_KEY: &str = "materialRequests";
pub const CLASSROOM_INVENTORIES_KEY: &str = "classroomInventories";
pub const SAFETY_INSPECTIONS_KEY: &str = "safetyInspections";
pub const STAFF_LIST_KEY: &str = "staffList";

/// Destination for settings snapshots
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    async fn load(&self, key: &str) -> AppResult<Option<Value>>;
    async fn save(&self, key: &str, value: Value) -> AppResult<()>;
}

/// PostgreSQL-backed sink (`settings_snapshots` table)
#[derive(Clone)]
pub struct PgSnapshotSink {
    pool: Pool<Postgres>,
}

impl PgSnapshotSink {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotSink for PgSnapshotSink {
    async fn load(&self, key: &str) -> AppResult<Option<Value>> {
        let value = sqlx::query_scalar::<_, Value>(
            "SELECT value FROM settings_snapshots WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    async fn save(&self, key: &str, value: Value) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO settings_snapshots (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Process-local sink, used when no database is configured
#[derive(Clone, Default)]
pub struct MemorySnapshotSink {
    values: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemorySnapshotSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.values.read().await.get(key).cloned()
    }
}

#[async_trait]
impl SnapshotSink for MemorySnapshotSink {
    async fn load(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.get(key).await)
    }

    async fn save(&self, key: &str, value: Value) -> AppResult<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

enum Command {
    Save { key: &'static str, value: Value },
    Flush(oneshot::Sender<()>),
}

/// Handle to the background snapshot writer
#[derive(Clone)]
pub struct SnapshotWriter {
    tx: mpsc::UnboundedSender<Command>,
}

impl SnapshotWriter {
    /// Spawn the writer task on the current tokio runtime
    pub fn spawn(sink: Arc<dyn SnapshotSink>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command>();

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Command::Save { key, value } => {
                        if let Err(e) = sink.save(key, value).await {
                            tracing::error!(key, error = %e, "Failed to persist snapshot");
                        } else {
                            tracing::debug!(key, "Snapshot persisted");
                        }
                    }
                    Command::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
        });

        Self { tx }
    }

    /// Queue a whole-list snapshot; never waits for the sink
    pub fn save<T: Serialize>(&self, key: &'static str, records: &[T]) {
        let value = match serde_json::to_value(records) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to serialize snapshot");
                return;
            }
        };
        if self.tx.send(Command::Save { key, value }).is_err() {
            tracing::warn!(key, "Snapshot writer stopped, snapshot dropped");
        }
    }

    /// Wait until every snapshot queued so far has been handed to the sink
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.tx.send(Command::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }
}

/// Read a stored list; `None` when the key was never saved
pub async fn load_list<T: serde::de::DeserializeOwned>(
    sink: &dyn SnapshotSink,
    key: &str,
) -> AppResult<Option<Vec<T>>> {
    match sink.load(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}
