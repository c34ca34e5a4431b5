//! Transcript endpoints.
//!
//! - `GET /get_chat_history`: greeting plus recent exchanges
//! - `POST /clear_chat`: empty the transcript
//! - `POST /clear_chat_history`: empty it and seed a fresh greeting

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, StatusResponse};
use crate::models::ChatLogEntry;

pub async fn history(State(ctx): State<ApiContext>) -> Json<Vec<ChatLogEntry>> {
    Json(ctx.core.chat_log.history(Utc::now()))
}

pub async fn clear_chat(State(ctx): State<ApiContext>) -> Result<Json<StatusResponse>, ApiError> {
    ctx.core.chat_log.clear(false, Utc::now())?;
    Ok(Json(StatusResponse::success("Chat cleared!")))
}

pub async fn clear_chat_history(
    State(ctx): State<ApiContext>,
) -> Result<Json<StatusResponse>, ApiError> {
    ctx.core.chat_log.clear(true, Utc::now())?;
    Ok(Json(StatusResponse::success("Chat history cleared!")))
}
