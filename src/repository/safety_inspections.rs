//! Safety inspection store

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::snapshots::{SnapshotWriter, SAFETY_INSPECTIONS_KEY};
use crate::{
    error::{AppError, AppResult},
    models::safety::SafetyInspection,
};

/// Oldest-first list of inspections
#[derive(Clone)]
pub struct SafetyInspectionStore {
    records: Arc<RwLock<Vec<SafetyInspection>>>,
    writer: SnapshotWriter,
}

impl SafetyInspectionStore {
    pub fn new(records: Vec<SafetyInspection>, writer: SnapshotWriter) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            writer,
        }
    }

    pub async fn list(&self) -> Vec<SafetyInspection> {
        self.records.read().await.clone()
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<SafetyInspection> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Safety inspection {} not found", id)))
    }

    pub async fn latest(&self) -> Option<SafetyInspection> {
        self.records.read().await.last().cloned()
    }

    pub async fn insert(&self, inspection: SafetyInspection) -> SafetyInspection {
        let mut records = self.records.write().await;
        records.push(inspection.clone());
        self.writer.save(SAFETY_INSPECTIONS_KEY, records.as_slice());
        inspection
    }

    /// Edit an inspection in place; nothing is stored if `edit` fails
    pub async fn modify<F>(&self, id: Uuid, now: DateTime<Utc>, edit: F) -> AppResult<SafetyInspection>
    where
        F: FnOnce(&mut SafetyInspection) -> AppResult<()>,
    {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Safety inspection {} not found", id)))?;

        let mut inspection = slot.clone();
        edit(&mut inspection)?;
        inspection.updated_at = now;
        *slot = inspection.clone();

        self.writer.save(SAFETY_INSPECTIONS_KEY, records.as_slice());
        Ok(inspection)
    }
}
