//! Token issuance for staff directory members

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::staff::{StaffMember, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Issue a JWT for a staff member presenting the school access code
    pub async fn issue_token(&self, staff_id: &str, access_code: &str) -> AppResult<(String, StaffMember)> {
        if access_code != self.config.access_code {
            tracing::warn!(staff_id, "Token refused: wrong access code");
            return Err(AppError::Authentication("Invalid staff id or access code".to_string()));
        }

        let member = self
            .repository
            .staff
            .get(staff_id.trim())
            .await
            .ok_or_else(|| {
                tracing::warn!(staff_id, "Token refused: unknown staff id");
                AppError::Authentication("Invalid staff id or access code".to_string())
            })?;

        let token = UserClaims::for_staff(&member, self.config.jwt_expiration_hours)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(staff_id = %member.id, role = %member.role, "Token issued");
        Ok((token, member))
    }

    pub fn expiration_hours(&self) -> u64 {
        self.config.jwt_expiration_hours
    }
}
