//! Medication endpoints.
//!
//! - `POST /save_medication`: add
//! - `PUT /update_medication/:key`: replace (key is an id, or a legacy index)
//! - `DELETE /delete_medication/:key`: remove

use axum::extract::{Path, State};
use axum::Json;

use super::collection;
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ApiContext, ItemResponse, StatusResponse};
use crate::models::Medication;

pub async fn save(
    State(ctx): State<ApiContext>,
    ApiJson(medication): ApiJson<Medication>,
) -> Result<Json<ItemResponse>, ApiError> {
    collection::create(&ctx, medication)
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Path(key): Path<String>,
    ApiJson(medication): ApiJson<Medication>,
) -> Result<Json<ItemResponse>, ApiError> {
    collection::update(&ctx, &key, medication)
}

pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(key): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    collection::delete::<Medication>(&ctx, &key)
}
