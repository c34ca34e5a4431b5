//! Profile endpoints.
//!
//! - `GET /get_user_data`: the whole profile document
//! - `POST /save_profile`: replace the profile section

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ApiContext, StatusResponse};
use crate::models::{ProfileDocument, UserProfile};

pub async fn get_user_data(State(ctx): State<ApiContext>) -> Json<ProfileDocument> {
    Json(ctx.core.profiles.load())
}

pub async fn save_profile(
    State(ctx): State<ApiContext>,
    ApiJson(profile): ApiJson<UserProfile>,
) -> Result<Json<StatusResponse>, ApiError> {
    ctx.core.profiles.save_profile(profile)?;
    tracing::info!("Profile saved");
    Ok(Json(StatusResponse::success("Profile saved!")))
}
