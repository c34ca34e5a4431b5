//! Chat endpoint.
//!
//! - `POST /ask`: answer a message, optionally replacing an earlier exchange

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{deserialize_flexible_id, ApiContext, SessionContext};
use crate::pipeline::assistant::{AskInput, AssistantError, Intent};

#[derive(Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "deserialize_flexible_id")]
    pub edit_id: Option<String>,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub reply: String,
    pub id: Option<String>,
    pub intent: Option<Intent>,
}

/// `POST /ask`: run the assistant pipeline for one message.
///
/// The pipeline runs in its own task so a panic inside it still produces
/// the apology reply instead of a dropped connection.
pub async fn ask(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    ApiJson(req): ApiJson<AskRequest>,
) -> Response {
    let language = ctx.session_language(&session);
    let assistant = ctx.core.assistant();
    let input = AskInput {
        message: req.message,
        edit_id: req.edit_id,
        language: language.clone(),
    };

    let worker = assistant.clone();
    let failure = match tokio::spawn(async move { worker.ask(input).await }).await {
        Ok(Ok(outcome)) => {
            return Json(AskResponse {
                reply: outcome.reply,
                id: Some(outcome.entry_id),
                intent: Some(outcome.intent),
            })
            .into_response();
        }
        Ok(Err(e)) if e.is_input_error() => {
            return ApiError::BadRequest(e.to_string()).into_response();
        }
        Ok(Err(e)) => e,
        Err(join_error) => AssistantError::Internal(join_error.to_string()),
    };

    tracing::error!(error = %failure, "Ask pipeline failed");
    let reply = assistant.apology(&language).await;
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(AskResponse {
            reply,
            id: None,
            intent: None,
        }),
    )
        .into_response()
}
