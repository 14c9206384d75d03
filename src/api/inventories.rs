//! Classroom inventory endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::inventory::{ClassroomInventory, InventorySummary, SetInventoryItem, UpdateInventory},
};

use super::AuthenticatedUser;

/// Get a classroom's inventory checklist
#[utoipa::path(
    get,
    path = "/classrooms/{class}/inventory",
    tag = "inventories",
    security(("bearer_auth" = [])),
    params(
        ("class" = String, Path, description = "School class, e.g. JHS 1")
    ),
    responses(
        (status = 200, description = "Stored inventory or the default checklist", body = ClassroomInventory)
    )
)]
pub async fn get_inventory(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(school_class): Path<String>,
) -> AppResult<Json<ClassroomInventory>> {
    let inventory = state.services.inventories.get(&school_class).await?;
    Ok(Json(inventory))
}

/// Update a classroom's inventory header fields
#[utoipa::path(
    put,
    path = "/classrooms/{class}/inventory",
    tag = "inventories",
    security(("bearer_auth" = [])),
    params(
        ("class" = String, Path, description = "School class")
    ),
    request_body = UpdateInventory,
    responses(
        (status = 200, description = "Inventory updated", body = ClassroomInventory),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn update_inventory(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(school_class): Path<String>,
    Json(update): Json<UpdateInventory>,
) -> AppResult<Json<ClassroomInventory>> {
    let inventory = state.services.inventories.update(&school_class, update).await?;
    Ok(Json(inventory))
}

/// Set one checklist entry
#[utoipa::path(
    put,
    path = "/classrooms/{class}/inventory/items",
    tag = "inventories",
    security(("bearer_auth" = [])),
    params(
        ("class" = String, Path, description = "School class")
    ),
    request_body = SetInventoryItem,
    responses(
        (status = 200, description = "Checklist entry updated", body = ClassroomInventory),
        (status = 400, description = "Unknown inventory item")
    )
)]
pub async fn set_inventory_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(school_class): Path<String>,
    Json(change): Json<SetInventoryItem>,
) -> AppResult<Json<ClassroomInventory>> {
    let inventory = state.services.inventories.set_item(&school_class, change).await?;
    Ok(Json(inventory))
}

/// Summaries of every recorded classroom
#[utoipa::path(
    get,
    path = "/classrooms",
    tag = "inventories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Classroom summaries", body = Vec<InventorySummary>)
    )
)]
pub async fn list_classrooms(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<InventorySummary>>> {
    Ok(Json(state.services.inventories.summaries().await))
}
