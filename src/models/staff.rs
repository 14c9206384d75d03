//! Staff identities and JWT claims

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Operational role of a staff member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Facilitator,
    LogisticsManager,
    StoreKeeper,
    AdminDesk,
    SafetyOfficer,
    Administrator,
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            StaffRole::Facilitator => "Facilitator",
            StaffRole::LogisticsManager => "Logistics Manager",
            StaffRole::StoreKeeper => "Store Keeper",
            StaffRole::AdminDesk => "Admin Desk",
            StaffRole::SafetyOfficer => "Safety Officer",
            StaffRole::Administrator => "Administrator",
        };
        write!(f, "{}", label)
    }
}

/// Staff directory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
}

/// Create or replace a staff directory entry
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertStaff {
    #[validate(length(min = 1, message = "Staff id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "Staff name is required"))]
    pub name: String,
    pub role: StaffRole,
}

/// Identity recorded on a request at each phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StaffRef {
    pub staff_id: String,
    pub name: String,
}

/// JWT Claims for authenticated staff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Staff id
    pub sub: String,
    pub name: String,
    pub role: StaffRole,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Claims for a staff member, valid for `hours`
    pub fn for_staff(member: &StaffMember, hours: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: member.id.clone(),
            name: member.name.clone(),
            role: member.role,
            iat: now,
            exp: now + (hours as i64) * 3600,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// The operator performing an action
    pub fn actor(&self) -> StaffRef {
        StaffRef {
            staff_id: self.sub.clone(),
            name: self.name.clone(),
        }
    }

    fn require_any(&self, roles: &[StaffRole], what: &str) -> Result<(), AppError> {
        if self.role == StaffRole::Administrator || roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "{} is not allowed to {}",
                self.role, what
            )))
        }
    }

    // Authorization checks
    pub fn require_approve_requests(&self) -> Result<(), AppError> {
        self.require_any(&[StaffRole::LogisticsManager], "approve material requests")
    }

    pub fn require_issue_materials(&self) -> Result<(), AppError> {
        self.require_any(&[StaffRole::StoreKeeper], "issue materials")
    }

    pub fn require_receive_returns(&self) -> Result<(), AppError> {
        self.require_any(
            &[StaffRole::AdminDesk, StaffRole::StoreKeeper],
            "receive returned materials",
        )
    }

    pub fn require_write_safety(&self) -> Result<(), AppError> {
        self.require_any(&[StaffRole::SafetyOfficer], "record safety inspections")
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        self.require_any(&[], "manage the staff directory")
    }
}
