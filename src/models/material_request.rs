//! Material request model and its lifecycle transitions
//!
//! Transitions are pure: they take the current record and return the next
//! one, or an error that leaves the caller's record untouched. Versioning and
//! timestamps are stamped by the store when the result is written back.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::{
    Category, Priority, Purpose, RequestStatus, ReturnCondition, ReturnStatus, SupplyCondition,
    UsageDuration,
};
use super::staff::StaffRef;
use crate::error::{AppError, AppResult};

/// Approval phase data, present from `Approved` onwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Approval {
    pub approved_quantity: u32,
    pub approval_date: NaiveDate,
    pub approved_by: StaffRef,
}

/// Issuance phase data, present from `Issued` onwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Issuance {
    pub date_issued: NaiveDate,
    pub supplied_by: StaffRef,
    pub condition_on_supply: SupplyCondition,
    pub expected_return_date: Option<NaiveDate>,
    /// Store or budget line the material came from
    pub store_source: Option<String>,
}

/// Return phase data, present only once `Returned`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReturnRecord {
    pub date_returned: NaiveDate,
    pub quantity_returned: u32,
    pub condition_on_return: ReturnCondition,
    pub received_by: StaffRef,
    pub return_status: ReturnStatus,
    pub loss_description: Option<String>,
}

/// A facilitator's request for teaching material or equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MaterialRequest {
    pub id: Uuid,
    /// Incremented on every accepted write
    pub version: u32,
    pub staff_id: String,
    /// Requester name cached at submission
    pub staff_name: String,
    pub item_name: String,
    pub category: Category,
    pub purpose: Purpose,
    pub quantity_requested: u32,
    pub date_requested: NaiveDate,
    pub date_required: NaiveDate,
    pub usage_duration: UsageDuration,
    pub priority: Priority,
    pub remarks: String,
    pub status: RequestStatus,
    pub approval: Option<Approval>,
    pub issuance: Option<Issuance>,
    pub return_record: Option<ReturnRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submit request payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMaterialRequest {
    pub staff_id: String,
    #[validate(length(min = 1, max = 200, message = "Item name is required"))]
    pub item_name: String,
    #[serde(default = "default_category")]
    pub category: Category,
    #[serde(default = "default_purpose")]
    pub purpose: Purpose,
    #[validate(
        required(message = "Quantity is required"),
        range(min = 1, message = "Quantity must be at least 1")
    )]
    pub quantity_requested: Option<u32>,
    pub date_requested: Option<NaiveDate>,
    pub date_required: Option<NaiveDate>,
    #[serde(default = "default_usage_duration")]
    pub usage_duration: UsageDuration,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(default)]
    pub remarks: String,
}

fn default_category() -> Category {
    Category::TeachingAid
}

fn default_purpose() -> Purpose {
    Purpose::Teaching
}

fn default_usage_duration() -> UsageDuration {
    UsageDuration::Temporary
}

fn default_priority() -> Priority {
    Priority::Medium
}

/// A lifecycle step requested by an operator
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Approve {
        approved_quantity: Option<u32>,
    },
    Decline,
    Issue {
        expected_return_date: Option<NaiveDate>,
        condition_on_supply: SupplyCondition,
        store_source: Option<String>,
    },
    Return {
        quantity_returned: Option<u32>,
        condition_on_return: ReturnCondition,
        loss_description: Option<String>,
    },
}

impl Transition {
    pub fn action(&self) -> &'static str {
        match self {
            Transition::Approve { .. } => "approve",
            Transition::Decline => "decline",
            Transition::Issue { .. } => "issue",
            Transition::Return { .. } => "return",
        }
    }

    /// Status the record must be in for this transition to apply
    pub fn required_status(&self) -> RequestStatus {
        match self {
            Transition::Approve { .. } | Transition::Decline => RequestStatus::Pending,
            Transition::Issue { .. } => RequestStatus::Approved,
            Transition::Return { .. } => RequestStatus::Issued,
        }
    }
}

impl MaterialRequest {
    /// Build a new pending request from a submission.
    pub fn submit(
        input: CreateMaterialRequest,
        staff_name: String,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        input.validate()?;

        let item_name = input.item_name.trim().to_string();
        if item_name.is_empty() {
            return Err(AppError::Validation("Item name is required".to_string()));
        }
        // validate() rejected None above
        let quantity_requested = input.quantity_requested.unwrap_or_default();
        let today = now.date_naive();

        Ok(Self {
            id: Uuid::new_v4(),
            version: 1,
            staff_id: input.staff_id,
            staff_name,
            item_name,
            category: input.category,
            purpose: input.purpose,
            quantity_requested,
            date_requested: input.date_requested.unwrap_or(today),
            date_required: input.date_required.unwrap_or(today),
            usage_duration: input.usage_duration,
            priority: input.priority,
            remarks: input.remarks,
            status: RequestStatus::Pending,
            approval: None,
            issuance: None,
            return_record: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a transition performed by `actor` on `today`.
    pub fn apply(
        &self,
        transition: &Transition,
        actor: &StaffRef,
        today: NaiveDate,
    ) -> AppResult<Self> {
        if self.status != transition.required_status() {
            return Err(AppError::InvalidTransition {
                from: self.status,
                action: transition.action(),
            });
        }

        let mut next = self.clone();
        match transition {
            Transition::Approve { approved_quantity } => {
                let approved_quantity = approved_quantity.unwrap_or(self.quantity_requested);
                if approved_quantity == 0 {
                    return Err(AppError::Validation(
                        "Approved quantity must be at least 1".to_string(),
                    ));
                }
                next.status = RequestStatus::Approved;
                next.approval = Some(Approval {
                    approved_quantity,
                    approval_date: today,
                    approved_by: actor.clone(),
                });
            }
            Transition::Decline => {
                next.status = RequestStatus::Declined;
            }
            Transition::Issue {
                expected_return_date,
                condition_on_supply,
                store_source,
            } => {
                next.status = RequestStatus::Issued;
                next.issuance = Some(Issuance {
                    date_issued: today,
                    supplied_by: actor.clone(),
                    condition_on_supply: *condition_on_supply,
                    expected_return_date: *expected_return_date,
                    store_source: store_source.clone(),
                });
            }
            Transition::Return {
                quantity_returned,
                condition_on_return,
                loss_description,
            } => {
                let approved = self.approved_quantity().unwrap_or(0);
                let quantity_returned = quantity_returned.unwrap_or(approved);
                let return_status = if quantity_returned < approved {
                    ReturnStatus::Partial
                } else {
                    ReturnStatus::Completed
                };
                next.status = RequestStatus::Returned;
                next.return_record = Some(ReturnRecord {
                    date_returned: today,
                    quantity_returned,
                    condition_on_return: *condition_on_return,
                    received_by: actor.clone(),
                    return_status,
                    loss_description: loss_description.clone(),
                });
            }
        }

        Ok(next)
    }

    pub fn approved_quantity(&self) -> Option<u32> {
        self.approval.as_ref().map(|a| a.approved_quantity)
    }

    pub fn expected_return_date(&self) -> Option<NaiveDate> {
        self.issuance.as_ref().and_then(|i| i.expected_return_date)
    }

    /// Issued, with an expected return date strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == RequestStatus::Issued
            && self.expected_return_date().map_or(false, |d| d < today)
    }
}

/// Request with values derived at read time
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MaterialRequestView {
    #[serde(flatten)]
    pub request: MaterialRequest,
    pub is_overdue: bool,
}

impl MaterialRequestView {
    pub fn new(request: MaterialRequest, today: NaiveDate) -> Self {
        let is_overdue = request.is_overdue(today);
        Self {
            request,
            is_overdue,
        }
    }
}

/// Filters for listing requests
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MaterialRequestQuery {
    pub status: Option<RequestStatus>,
    pub staff_id: Option<String>,
    /// Only requests currently overdue
    pub overdue: Option<bool>,
}
