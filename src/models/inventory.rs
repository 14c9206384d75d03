//! Classroom infrastructure inventory

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{InventoryPriority, ItemCondition, ItemStatus};
use crate::error::{AppError, AppResult};

/// Fixed checklist every classroom is audited against
pub const INVENTORY_ITEMS: [&str; 10] = [
    "Desks & Chairs (Pupils)",
    "Teacher's Table & Chair",
    "Chalkboard / Whiteboard",
    "Markers / Chalk / Erasers",
    "Functional Lighting",
    "Ventilation / Windows",
    "Doors & Locks",
    "Power Sockets & Switches",
    "ICT Equipment (Projector/Laptop)",
    "Teaching Aids & Posters",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryEntry {
    pub item: String,
    pub status: ItemStatus,
    pub condition: ItemCondition,
}

/// Inventory of one classroom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassroomInventory {
    pub id: Uuid,
    pub block: String,
    pub room_number: String,
    pub school_class: String,
    pub inspection_date: NaiveDate,
    pub items: Vec<InventoryEntry>,
    pub damaged_missing_notes: String,
    pub priority: InventoryPriority,
    pub comments: String,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a classroom inventory
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateInventory {
    pub block: Option<String>,
    pub room_number: Option<String>,
    pub inspection_date: Option<NaiveDate>,
    pub damaged_missing_notes: Option<String>,
    pub priority: Option<InventoryPriority>,
    pub comments: Option<String>,
}

/// Set the status and/or condition of one checklist item
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetInventoryItem {
    pub item: String,
    pub status: Option<ItemStatus>,
    pub condition: Option<ItemCondition>,
}

/// Counts derived from a classroom inventory
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InventorySummary {
    pub school_class: String,
    pub missing: usize,
    pub damaged: usize,
    pub poor_condition: usize,
    pub needs_attention: bool,
}

impl ClassroomInventory {
    /// Blank template: every item available and in good condition
    pub fn template(school_class: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            block: "Main Block".to_string(),
            room_number: "Room 01".to_string(),
            school_class: school_class.to_string(),
            inspection_date: now.date_naive(),
            items: INVENTORY_ITEMS
                .iter()
                .map(|item| InventoryEntry {
                    item: item.to_string(),
                    status: ItemStatus::Available,
                    condition: ItemCondition::Good,
                })
                .collect(),
            damaged_missing_notes: String::new(),
            priority: InventoryPriority::Low,
            comments: String::new(),
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateInventory) {
        if let Some(block) = update.block {
            self.block = block;
        }
        if let Some(room_number) = update.room_number {
            self.room_number = room_number;
        }
        if let Some(date) = update.inspection_date {
            self.inspection_date = date;
        }
        if let Some(notes) = update.damaged_missing_notes {
            self.damaged_missing_notes = notes;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(comments) = update.comments {
            self.comments = comments;
        }
    }

    pub fn set_item(&mut self, change: &SetInventoryItem) -> AppResult<()> {
        let entry = self
            .items
            .iter_mut()
            .find(|e| e.item == change.item)
            .ok_or_else(|| {
                AppError::Validation(format!("Unknown inventory item '{}'", change.item))
            })?;
        if let Some(status) = change.status {
            entry.status = status;
        }
        if let Some(condition) = change.condition {
            entry.condition = condition;
        }
        Ok(())
    }

    pub fn summary(&self) -> InventorySummary {
        let count = |status: ItemStatus| self.items.iter().filter(|e| e.status == status).count();
        let missing = count(ItemStatus::Missing);
        let damaged = count(ItemStatus::Damaged);
        let poor_condition = self
            .items
            .iter()
            .filter(|e| e.condition == ItemCondition::Poor)
            .count();

        InventorySummary {
            school_class: self.school_class.clone(),
            missing,
            damaged,
            poor_condition,
            needs_attention: missing + damaged > 0 || self.priority >= InventoryPriority::High,
        }
    }
}
