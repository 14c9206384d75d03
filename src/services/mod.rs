//! Business logic services

pub mod auth;
pub mod inventories;
pub mod material_requests;
pub mod reports;
pub mod safety;
pub mod staff;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub material_requests: material_requests::MaterialRequestsService,
    pub inventories: inventories::InventoriesService,
    pub safety: safety::SafetyService,
    pub staff: staff::StaffService,
    pub reports: reports::ReportsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            material_requests: material_requests::MaterialRequestsService::new(repository.clone()),
            inventories: inventories::InventoriesService::new(repository.clone()),
            safety: safety::SafetyService::new(repository.clone()),
            staff: staff::StaffService::new(repository.clone()),
            reports: reports::ReportsService::new(repository.clone()),
            repository,
        }
    }

    /// Wait for queued snapshots to reach the persistence sink
    pub async fn flush(&self) {
        self.repository.writer.flush().await;
    }
}
