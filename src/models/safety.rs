//! School safety inspections

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{CheckStatus, InspectionStatus, RiskLevel};
use crate::error::{AppError, AppResult};

pub const SAFETY_CHECKS: [&str; 10] = [
    "School Fence & Gates",
    "Classroom Safety (Floors/Walls)",
    "Fire Safety Equipment",
    "Emergency Exits & Signage",
    "Electrical Safety (Wiring)",
    "Water & Sanitation",
    "Playground Equipment",
    "Lab / Workshop Safety",
    "Storage Room Security",
    "First Aid Kit Completeness",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SafetyCheck {
    pub check: String,
    pub status: CheckStatus,
    pub risk: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SafetyInspection {
    pub id: Uuid,
    pub inspector_name: String,
    pub date: NaiveDate,
    pub checks: Vec<SafetyCheck>,
    pub hazards_identified: String,
    pub actions_required: String,
    pub status: InspectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Start a new inspection
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateSafetyInspection {
    /// Defaults to the authenticated officer's name
    pub inspector_name: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSafetyInspection {
    pub inspector_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub hazards_identified: Option<String>,
    pub actions_required: Option<String>,
    pub status: Option<InspectionStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetSafetyCheck {
    pub check: String,
    pub status: Option<CheckStatus>,
    pub risk: Option<RiskLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SafetySummary {
    pub inspection_id: Uuid,
    pub date: NaiveDate,
    pub status: InspectionStatus,
    pub unsafe_count: usize,
    pub maintenance_count: usize,
    pub high_risk_count: usize,
}

impl SafetyInspection {
    pub fn new(inspector_name: String, date: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            inspector_name,
            date,
            checks: SAFETY_CHECKS
                .iter()
                .map(|check| SafetyCheck {
                    check: check.to_string(),
                    status: CheckStatus::Safe,
                    risk: RiskLevel::Low,
                })
                .collect(),
            hazards_identified: String::new(),
            actions_required: String::new(),
            status: InspectionStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateSafetyInspection) {
        if let Some(name) = update.inspector_name {
            self.inspector_name = name;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(hazards) = update.hazards_identified {
            self.hazards_identified = hazards;
        }
        if let Some(actions) = update.actions_required {
            self.actions_required = actions;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }

    pub fn set_check(&mut self, change: &SetSafetyCheck) -> AppResult<()> {
        let check = self
            .checks
            .iter_mut()
            .find(|c| c.check == change.check)
            .ok_or_else(|| AppError::Validation(format!("Unknown safety check '{}'", change.check)))?;
        if let Some(status) = change.status {
            check.status = status;
        }
        if let Some(risk) = change.risk {
            check.risk = risk;
        }
        Ok(())
    }

    pub fn summary(&self) -> SafetySummary {
        let with_status =
            |status: CheckStatus| self.checks.iter().filter(|c| c.status == status).count();
        SafetySummary {
            inspection_id: self.id,
            date: self.date,
            status: self.status,
            unsafe_count: with_status(CheckStatus::Unsafe),
            maintenance_count: with_status(CheckStatus::MaintenanceRequired),
            high_risk_count: self.checks.iter().filter(|c| c.risk == RiskLevel::High).count(),
        }
    }
}
