//! Appointment endpoints.
//!
//! - `GET /get_appointments`: booked appointments
//! - `GET /available_slots/:department/:doctor/:date`: slot availability
//! - `POST /save_appointment`, `PUT /update_appointment/:key`,
//!   `DELETE /delete_appointment/:key`

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::collection;
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ApiContext, ItemResponse, StatusResponse};
use crate::directory::{self, SlotAvailability};
use crate::models::Appointment;

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
}

/// `GET /get_appointments`
pub async fn list(State(ctx): State<ApiContext>) -> Json<AppointmentsResponse> {
    let doc = ctx.core.profiles.load();
    Json(AppointmentsResponse {
        appointments: doc.appointments,
    })
}

/// `GET /available_slots/:department/:doctor/:date`
pub async fn available_slots(
    State(ctx): State<ApiContext>,
    Path((department, doctor, date)): Path<(String, String, String)>,
) -> Result<Json<SlotAvailability>, ApiError> {
    if chrono::NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").is_err() {
        return Err(ApiError::BadRequest("Date must be YYYY-MM-DD".into()));
    }
    let doc = ctx.core.profiles.load();
    directory::available_slots(&doc, &department, &doctor, &date)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No doctor {doctor} in {department}")))
}

pub async fn save(
    State(ctx): State<ApiContext>,
    ApiJson(appointment): ApiJson<Appointment>,
) -> Result<Json<ItemResponse>, ApiError> {
    collection::create(&ctx, appointment)
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Path(key): Path<String>,
    ApiJson(appointment): ApiJson<Appointment>,
) -> Result<Json<ItemResponse>, ApiError> {
    collection::update(&ctx, &key, appointment)
}

pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(key): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    collection::delete::<Appointment>(&ctx, &key)
}
