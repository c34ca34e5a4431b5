//! Upload endpoints.
//!
//! - `POST /image_to_text`: OCR, multipart field `file`
//! - `POST /image_identify`: short description, multipart field `file`
//! - `POST /audio_to_text`: transcript in the session language
//! - `GET /uploads/:filename`: serve a stored upload

use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::pipeline::media;

/// Per-file upload limit.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Route-level body limit; leaves room for multipart framing.
pub const MAX_BODY_BYTES: usize = MAX_UPLOAD_BYTES + 64 * 1024;

const UPLOAD_FIELD: &str = "file";

struct UploadedFile {
    mime_type: String,
    bytes: Vec<u8>,
}

#[derive(Serialize)]
pub struct ImageTextResponse {
    pub text: String,
    pub file_url: String,
}

#[derive(Serialize)]
pub struct ImageDescriptionResponse {
    pub description: String,
    pub file_url: String,
}

#[derive(Serialize)]
pub struct AudioTextResponse {
    pub text: String,
}

// ═══════════════════════════════════════════════════════════
// Handlers
// ═══════════════════════════════════════════════════════════

pub async fn image_to_text(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<ImageTextResponse>, ApiError> {
    let upload = read_upload(multipart, media::is_image_mime).await?;
    let file_url = store_upload(&ctx, &upload)?;

    let text = media::extract_text(
        ctx.core.vision.clone(),
        upload.bytes,
        upload.mime_type,
        ctx.core.config.completion_timeout,
    )
    .await;

    tracing::info!(chars = text.chars().count(), "Image text extracted");
    Ok(Json(ImageTextResponse { text, file_url }))
}

pub async fn image_identify(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    multipart: Multipart,
) -> Result<Json<ImageDescriptionResponse>, ApiError> {
    let upload = read_upload(multipart, media::is_image_mime).await?;
    let file_url = store_upload(&ctx, &upload)?;

    let english = media::identify_image(
        ctx.core.vision.clone(),
        upload.bytes,
        upload.mime_type,
        ctx.core.config.completion_timeout,
    )
    .await;

    let language = ctx.session_language(&session);
    let description = ctx.core.translation().from_english(&english, &language).await;

    Ok(Json(ImageDescriptionResponse {
        description,
        file_url,
    }))
}

pub async fn audio_to_text(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    multipart: Multipart,
) -> Result<Json<AudioTextResponse>, ApiError> {
    let upload = read_upload(multipart, media::is_audio_mime).await?;
    let language = ctx.session_language(&session);

    let text = media::transcribe(
        ctx.core.speech.clone(),
        upload.bytes,
        upload.mime_type,
        language,
        ctx.core.config.completion_timeout,
    )
    .await
    .map_err(|e| ApiError::ServiceUnavailable(e.to_string()))?;

    Ok(Json(AudioTextResponse { text }))
}

/// `GET /uploads/:filename`
pub async fn serve_upload(
    State(ctx): State<ApiContext>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let not_found = || ApiError::NotFound("File not found".into());
    let path = ctx.core.uploads.resolve(&filename).ok_or_else(not_found)?;
    let bytes = tokio::fs::read(&path).await.map_err(|_| not_found())?;
    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(Body::from(bytes))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

// ═══════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════

/// Pull the `file` field out of the form, enforcing size and MIME type.
async fn read_upload(
    mut multipart: Multipart,
    accepts: fn(&str) -> bool,
) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name().unwrap_or("") != UPLOAD_FIELD {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload");
        let mime_type = field
            .content_type()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
            .unwrap_or_else(|| {
                mime_guess::from_path(file_name)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            });

        if !accepts(&mime_type) {
            return Err(ApiError::UnsupportedMedia(mime_type));
        }

        let bytes = field.bytes().await.map_err(multipart_error)?;
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::PayloadTooLarge("Maximum upload size is 10 MB".into()));
        }
        if bytes.is_empty() {
            return Err(ApiError::BadRequest("Uploaded file is empty".into()));
        }

        return Ok(UploadedFile {
            mime_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::BadRequest("No file uploaded".into()))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("Maximum upload size is 10 MB".into())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

fn store_upload(ctx: &ApiContext, upload: &UploadedFile) -> Result<String, ApiError> {
    let stored = ctx.core.uploads.save(&upload.mime_type, &upload.bytes)?;
    Ok(format!("/uploads/{stored}"))
}
