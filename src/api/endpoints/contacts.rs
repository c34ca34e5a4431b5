//! Emergency contact endpoints.
//!
//! - `POST /save_emergency_contact` (also `POST /save_emergency`)
//! - `PUT /update_emergency_contact/:key`
//! - `DELETE /delete_emergency_contact/:key`

use axum::extract::{Path, State};
use axum::Json;

use super::collection;
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ApiContext, ItemResponse, StatusResponse};
use crate::models::EmergencyContact;

pub async fn save(
    State(ctx): State<ApiContext>,
    ApiJson(contact): ApiJson<EmergencyContact>,
) -> Result<Json<ItemResponse>, ApiError> {
    collection::create(&ctx, contact)
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Path(key): Path<String>,
    ApiJson(contact): ApiJson<EmergencyContact>,
) -> Result<Json<ItemResponse>, ApiError> {
    collection::update(&ctx, &key, contact)
}

pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(key): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    collection::delete::<EmergencyContact>(&ctx, &key)
}
