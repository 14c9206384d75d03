//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Implements `Display` with the labels staff see on the logistics forms.
macro_rules! display_labels {
    ($ty:ident { $($variant:ident => $label:expr),+ $(,)? }) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let label = match self {
                    $($ty::$variant => $label,)+
                };
                write!(f, "{}", label)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Material requests
// ---------------------------------------------------------------------------

/// Kind of material being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TeachingAid,
    Stationery,
    Ict,
    Equipment,
    Other,
}

display_labels!(Category {
    TeachingAid => "Teaching Aid",
    Stationery => "Stationery",
    Ict => "ICT",
    Equipment => "Equipment",
    Other => "Other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Teaching,
    Assessment,
    Support,
    Other,
}

display_labels!(Purpose {
    Teaching => "Teaching",
    Assessment => "Assessment",
    Support => "Support",
    Other => "Other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UsageDuration {
    Temporary,
    Permanent,
}

display_labels!(UsageDuration {
    Temporary => "Temporary",
    Permanent => "Permanent",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

display_labels!(Priority {
    Low => "Low",
    Medium => "Medium",
    High => "High",
});

/// Lifecycle status of a material request
///
/// `Pending -> Approved | Declined`, `Approved -> Issued`, `Issued -> Returned`.
/// `Declined` and `Returned` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Declined,
    Issued,
    Returned,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 5] = [
        RequestStatus::Pending,
        RequestStatus::Approved,
        RequestStatus::Declined,
        RequestStatus::Issued,
        RequestStatus::Returned,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Declined | RequestStatus::Returned)
    }
}

display_labels!(RequestStatus {
    Pending => "Pending",
    Approved => "Approved",
    Declined => "Declined",
    Issued => "Issued",
    Returned => "Returned",
});

/// Condition of the material when handed to the facilitator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SupplyCondition {
    New,
    #[default]
    Good,
    Fair,
    Poor,
}

display_labels!(SupplyCondition {
    New => "New",
    Good => "Good",
    Fair => "Fair",
    Poor => "Poor",
});

/// Condition of the material when brought back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReturnCondition {
    #[default]
    Good,
    Damaged,
    Lost,
}

display_labels!(ReturnCondition {
    Good => "Good",
    Damaged => "Damaged",
    Lost => "Lost",
});

/// Completeness of a return.
///
/// `Overdue` is part of the stored vocabulary but no transition assigns it;
/// lateness is derived on read from the expected return date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    Completed,
    Partial,
    Overdue,
}

display_labels!(ReturnStatus {
    Completed => "Completed",
    Partial => "Partial",
    Overdue => "Overdue",
});

// ---------------------------------------------------------------------------
// Classroom inventory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Available,
    Missing,
    Damaged,
}

display_labels!(ItemStatus {
    Available => "Available",
    Missing => "Missing",
    Damaged => "Damaged",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemCondition {
    Good,
    Fair,
    Poor,
    NotApplicable,
}

display_labels!(ItemCondition {
    Good => "Good",
    Fair => "Fair",
    Poor => "Poor",
    NotApplicable => "N/A",
});

/// Urgency of classroom repairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InventoryPriority {
    Low,
    Medium,
    High,
    Emergency,
}

display_labels!(InventoryPriority {
    Low => "Low",
    Medium => "Medium",
    High => "High",
    Emergency => "Emergency",
});

// ---------------------------------------------------------------------------
// Safety inspections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Safe,
    Unsafe,
    MaintenanceRequired,
    NotApplicable,
}

display_labels!(CheckStatus {
    Safe => "Safe",
    Unsafe => "Unsafe",
    MaintenanceRequired => "Maintenance Required",
    NotApplicable => "N/A",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

display_labels!(RiskLevel {
    Low => "Low",
    Medium => "Medium",
    High => "High",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    Pending,
    InProgress,
    Completed,
}

display_labels!(InspectionStatus {
    Pending => "Pending",
    InProgress => "In Progress",
    Completed => "Completed",
});
