//! Data models for the logistics server

pub mod enums;
pub mod inventory;
pub mod material_request;
pub mod safety;
pub mod staff;

// Re-export commonly used types
pub use inventory::ClassroomInventory;
pub use material_request::{MaterialRequest, MaterialRequestView, Transition};
pub use safety::SafetyInspection;
pub use staff::{StaffMember, StaffRef, StaffRole, UserClaims};
