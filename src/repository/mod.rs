//! Repository layer: in-memory aggregates backed by settings snapshots

pub mod inventories;
pub mod material_requests;
pub mod safety_inspections;
pub mod snapshots;
pub mod staff;

use std::sync::Arc;

use crate::{error::AppResult, models::staff::StaffMember};

use snapshots::{load_list, SnapshotSink, SnapshotWriter};

/// Main repository struct holding every store
#[derive(Clone)]
pub struct Repository {
    pub material_requests: material_requests::MaterialRequestStore,
    pub inventories: inventories::ClassroomInventoryStore,
    pub safety_inspections: safety_inspections::SafetyInspectionStore,
    pub staff: staff::StaffDirectory,
    pub writer: SnapshotWriter,
}

impl Repository {
    /// Hydrate every store from `sink`.
    ///
    /// `seed_staff` is used only when no staff list has been persisted yet.
    pub async fn load(sink: Arc<dyn SnapshotSink>, seed_staff: Vec<StaffMember>) -> AppResult<Self> {
        let requests = load_list(sink.as_ref(), snapshots::MATERIAL_REQUESTS_KEY)
            .await?
            .unwrap_or_default();
        let inventories = load_list(sink.as_ref(), snapshots::CLASSROOM_INVENTORIES_KEY)
            .await?
            .unwrap_or_default();
        let inspections = load_list(sink.as_ref(), snapshots::SAFETY_INSPECTIONS_KEY)
            .await?
            .unwrap_or_default();
        let staff = load_list(sink.as_ref(), snapshots::STAFF_LIST_KEY)
            .await?
            .unwrap_or(seed_staff);

        let writer = SnapshotWriter::spawn(sink);

        let repository = Self {
            material_requests: material_requests::MaterialRequestStore::new(requests, writer.clone()),
            inventories: inventories::ClassroomInventoryStore::new(inventories, writer.clone()),
            safety_inspections: safety_inspections::SafetyInspectionStore::new(
                inspections,
                writer.clone(),
            ),
            staff: staff::StaffDirectory::new(staff, writer.clone()),
            writer,
        };

        tracing::info!(
            requests = repository.material_requests.count().await,
            staff = repository.staff.list().await.len(),
            "Repository loaded"
        );

        Ok(repository)
    }
}
