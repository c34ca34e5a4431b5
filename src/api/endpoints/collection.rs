//! Shared create/update/delete handling for the profile document's lists.

use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ItemResponse, StatusResponse};
use crate::store::ListItem;

pub fn create<T: ListItem>(ctx: &ApiContext, item: T) -> Result<Json<ItemResponse>, ApiError> {
    item.validate().map_err(ApiError::BadRequest)?;
    let saved = ctx.core.profiles.add(item)?;
    tracing::info!(kind = T::KIND, id = %saved.id(), "Item added");
    Ok(Json(ItemResponse {
        status: "success",
        message: format!("{} saved!", T::KIND),
        id: saved.id().to_string(),
    }))
}

pub fn update<T: ListItem>(ctx: &ApiContext, key: &str, item: T) -> Result<Json<ItemResponse>, ApiError> {
    item.validate().map_err(ApiError::BadRequest)?;
    let updated = ctx
        .core
        .profiles
        .update(key, item)?
        .ok_or_else(|| not_found::<T>())?;
    tracing::info!(kind = T::KIND, id = %updated.id(), "Item updated");
    Ok(Json(ItemResponse {
        status: "success",
        message: format!("{} updated!", T::KIND),
        id: updated.id().to_string(),
    }))
}

pub fn delete<T: ListItem>(ctx: &ApiContext, key: &str) -> Result<Json<StatusResponse>, ApiError> {
    let removed: T = ctx
        .core
        .profiles
        .remove(key)?
        .ok_or_else(|| not_found::<T>())?;
    tracing::info!(kind = T::KIND, id = %removed.id(), "Item deleted");
    Ok(Json(StatusResponse::success(format!("{} deleted!", T::KIND))))
}

fn not_found<T: ListItem>() -> ApiError {
    ApiError::NotFound(format!("{} not found", T::KIND))
}
