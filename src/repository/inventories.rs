//! Classroom inventory store, keyed by school class

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::snapshots::{SnapshotWriter, CLASSROOM_INVENTORIES_KEY};
use crate::{error::AppResult, models::inventory::ClassroomInventory};

#[derive(Clone)]
pub struct ClassroomInventoryStore {
    by_class: Arc<RwLock<IndexMap<String, ClassroomInventory>>>,
    writer: SnapshotWriter,
}

impl ClassroomInventoryStore {
    pub fn new(inventories: Vec<ClassroomInventory>, writer: SnapshotWriter) -> Self {
        let by_class = inventories
            .into_iter()
            .map(|i| (i.school_class.clone(), i))
            .collect();
        Self {
            by_class: Arc::new(RwLock::new(by_class)),
            writer,
        }
    }

    pub async fn get(&self, school_class: &str) -> Option<ClassroomInventory> {
        self.by_class.read().await.get(school_class).cloned()
    }

    /// All stored inventories, in the order classes were first recorded
    pub async fn list(&self) -> Vec<ClassroomInventory> {
        self.by_class.read().await.values().cloned().collect()
    }

    /// Edit a class inventory, creating it from the template on first write.
    ///
    /// Nothing is stored if `edit` fails.
    pub async fn modify<F>(
        &self,
        school_class: &str,
        now: DateTime<Utc>,
        edit: F,
    ) -> AppResult<ClassroomInventory>
    where
        F: FnOnce(&mut ClassroomInventory) -> AppResult<()>,
    {
        let mut by_class = self.by_class.write().await;
        let mut inventory = by_class
            .get(school_class)
            .cloned()
            .unwrap_or_else(|| ClassroomInventory::template(school_class, now));

        edit(&mut inventory)?;
        inventory.updated_at = now;
        by_class.insert(school_class.to_string(), inventory.clone());

        let snapshot: Vec<&ClassroomInventory> = by_class.values().collect();
        self.writer.save(CLASSROOM_INVENTORIES_KEY, snapshot.as_slice());
        Ok(inventory)
    }
}
