//! Safety inspection service

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        safety::{CreateSafetyInspection, SafetyInspection, SetSafetyCheck, UpdateSafetyInspection},
        staff::StaffRef,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct SafetyService {
    repository: Repository,
}

impl SafetyService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Vec<SafetyInspection> {
        self.repository.safety_inspections.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<SafetyInspection> {
        self.repository.safety_inspections.get_by_id(id).await
    }

    pub async fn latest(&self) -> AppResult<SafetyInspection> {
        self.repository
            .safety_inspections
            .latest()
            .await
            .ok_or_else(|| AppError::NotFound("No safety inspection recorded".to_string()))
    }

    /// Start a new inspection with every check marked safe
    pub async fn start(
        &self,
        input: CreateSafetyInspection,
        actor: &StaffRef,
    ) -> AppResult<SafetyInspection> {
        let now = Utc::now();
        let inspector_name = input
            .inspector_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| actor.name.clone());
        let inspection = SafetyInspection::new(
            inspector_name,
            input.date.unwrap_or_else(|| now.date_naive()),
            now,
        );

        let inspection = self.repository.safety_inspections.insert(inspection).await;
        tracing::info!(inspection_id = %inspection.id, inspector = %inspection.inspector_name, "Safety inspection started");
        Ok(inspection)
    }

    pub async fn update(&self, id: Uuid, update: UpdateSafetyInspection) -> AppResult<SafetyInspection> {
        let inspection = self
            .repository
            .safety_inspections
            .modify(id, Utc::now(), |i| {
                i.apply_update(update);
                Ok(())
            })
            .await?;
        tracing::info!(inspection_id = %id, status = %inspection.status, "Safety inspection updated");
        Ok(inspection)
    }

    pub async fn set_check(&self, id: Uuid, change: SetSafetyCheck) -> AppResult<SafetyInspection> {
        self.repository
            .safety_inspections
            .modify(id, Utc::now(), |i| i.set_check(&change))
            .await
    }
}
