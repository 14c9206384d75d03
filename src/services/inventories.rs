//! Classroom inventory service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::inventory::{ClassroomInventory, InventorySummary, SetInventoryItem, UpdateInventory},
    repository::Repository,
};

#[derive(Clone)]
pub struct InventoriesService {
    repository: Repository,
}

impl InventoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Stored inventory, or the unsaved default template
    pub async fn get(&self, school_class: &str) -> AppResult<ClassroomInventory> {
        let school_class = normalize_class(school_class)?;
        Ok(self
            .repository
            .inventories
            .get(school_class)
            .await
            .unwrap_or_else(|| ClassroomInventory::template(school_class, Utc::now())))
    }

    pub async fn update(
        &self,
        school_class: &str,
        update: UpdateInventory,
    ) -> AppResult<ClassroomInventory> {
        let school_class = normalize_class(school_class)?;
        let inventory = self
            .repository
            .inventories
            .modify(school_class, Utc::now(), |inv| {
                inv.apply_update(update);
                Ok(())
            })
            .await?;
        tracing::info!(school_class, priority = %inventory.priority, "Classroom inventory updated");
        Ok(inventory)
    }

    pub async fn set_item(
        &self,
        school_class: &str,
        change: SetInventoryItem,
    ) -> AppResult<ClassroomInventory> {
        let school_class = normalize_class(school_class)?;
        let inventory = self
            .repository
            .inventories
            .modify(school_class, Utc::now(), |inv| inv.set_item(&change))
            .await?;
        tracing::info!(school_class, item = %change.item, "Classroom inventory item updated");
        Ok(inventory)
    }

    /// Summaries for every recorded classroom
    pub async fn summaries(&self) -> Vec<InventorySummary> {
        self.repository
            .inventories
            .list()
            .await
            .iter()
            .map(ClassroomInventory::summary)
            .collect()
    }
}

fn normalize_class(school_class: &str) -> AppResult<&str> {
    let trimmed = school_class.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("School class is required".to_string()));
    }
    Ok(trimmed)
}
