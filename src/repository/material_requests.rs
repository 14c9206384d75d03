//! Material request store

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::snapshots::{SnapshotWriter, MATERIAL_REQUESTS_KEY};
use crate::{
    error::{AppError, AppResult},
    models::material_request::MaterialRequest,
};

/// Newest-first list of material requests
#[derive(Clone)]
pub struct MaterialRequestStore {
    records: Arc<RwLock<Vec<MaterialRequest>>>,
    writer: SnapshotWriter,
}

impl MaterialRequestStore {
    pub fn new(records: Vec<MaterialRequest>, writer: SnapshotWriter) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            writer,
        }
    }

    pub async fn list(&self) -> Vec<MaterialRequest> {
        self.records.read().await.clone()
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<MaterialRequest> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Material request {} not found", id)))
    }

    /// Prepend a new request
    pub async fn insert(&self, request: MaterialRequest) -> MaterialRequest {
        let mut records = self.records.write().await;
        records.insert(0, request.clone());
        self.writer.save(MATERIAL_REQUESTS_KEY, records.as_slice());
        request
    }

    /// Replace a request if it is still at `expected_version`.
    ///
    /// The stored copy gets the next version and `now` as its update time.
    pub async fn replace(
        &self,
        mut next: MaterialRequest,
        expected_version: u32,
        now: DateTime<Utc>,
    ) -> AppResult<MaterialRequest> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id == next.id)
            .ok_or_else(|| AppError::NotFound(format!("Material request {} not found", next.id)))?;

        if slot.version != expected_version {
            return Err(AppError::Conflict(format!(
                "Material request {} was modified (version {}, expected {})",
                next.id, slot.version, expected_version
            )));
        }

        next.version = expected_version + 1;
        next.updated_at = now;
        *slot = next.clone();
        self.writer.save(MATERIAL_REQUESTS_KEY, records.as_slice());
        Ok(next)
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}
