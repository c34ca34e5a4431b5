//! Session language endpoints.
//!
//! - `POST /set_language`: `{language}`
//! - `GET /get_language`

use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{validate_language, ApiContext, SessionContext, SUPPORTED_LANGUAGES};

#[derive(Deserialize)]
pub struct SetLanguageRequest {
    #[serde(default)]
    pub language: String,
}

#[derive(Serialize)]
pub struct LanguageResponse {
    pub status: &'static str,
    pub language: String,
}

pub async fn set_language(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    ApiJson(req): ApiJson<SetLanguageRequest>,
) -> Result<Json<LanguageResponse>, ApiError> {
    let language = validate_language(&req.language).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "Unsupported language. Choose one of: {}",
            SUPPORTED_LANGUAGES.join(", ")
        ))
    })?;

    ctx.sessions
        .lock()
        .map_err(|_| ApiError::Internal("session store lock poisoned".into()))?
        .set_language(&session.session_id, &language);

    tracing::info!(%language, "Session language set");
    Ok(Json(LanguageResponse {
        status: "success",
        language,
    }))
}

pub async fn get_language(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
) -> Json<LanguageResponse> {
    Json(LanguageResponse {
        status: "success",
        language: ctx.session_language(&session),
    })
}
