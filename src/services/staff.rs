//! Staff directory service

use validator::Validate;

use crate::{
    error::AppResult,
    models::staff::{StaffMember, UpsertStaff},
    repository::Repository,
};

#[derive(Clone)]
pub struct StaffService {
    repository: Repository,
}

impl StaffService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Vec<StaffMember> {
        self.repository.staff.list().await
    }

    /// Create or replace a staff member; returns the member and whether it is new
    pub async fn upsert(&self, data: UpsertStaff) -> AppResult<(StaffMember, bool)> {
        let data = UpsertStaff {
            id: data.id.trim().to_string(),
            name: data.name.trim().to_string(),
            role: data.role,
        };
        data.validate()?;
        let member = StaffMember {
            id: data.id,
            name: data.name,
            role: data.role,
        };
        let created = self.repository.staff.upsert(member.clone()).await;
        tracing::info!(staff_id = %member.id, role = %member.role, created, "Staff directory updated");
        Ok((member, created))
    }
}
