//! HealthBot HTTP router.
//!
//! Returns a composable `Router`: JSON routes at the root, stored uploads
//! under `/uploads/`, and the static front-end as the fallback.
//!
//! Middleware stack (outermost → innermost):
//! 1. CORS → 2. Session cookie → 3. Access log → 4. Panic catcher

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::error::panic_response;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the full application router.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);
    build_router(ctx)
}

fn build_router(ctx: ApiContext) -> Router {
    let static_dir = ctx.core.config.static_dir.clone();

    // Multipart routes get a larger body limit than the JSON ones.
    let uploads = Router::new()
        .route("/image_to_text", post(endpoints::media::image_to_text))
        .route("/image_identify", post(endpoints::media::image_identify))
        .route("/audio_to_text", post(endpoints::media::audio_to_text))
        .layer(DefaultBodyLimit::max(endpoints::media::MAX_BODY_BYTES));

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    Router::new()
        .route("/ask", post(endpoints::ask::ask))
        .route("/get_user_data", get(endpoints::profile::get_user_data))
        .route("/save_profile", post(endpoints::profile::save_profile))
        .route("/save_medication", post(endpoints::medications::save))
        .route("/update_medication/:key", put(endpoints::medications::update))
        .route("/delete_medication/:key", delete(endpoints::medications::delete))
        .route("/save_emergency_contact", post(endpoints::contacts::save))
        .route("/save_emergency", post(endpoints::contacts::save))
        .route(
            "/update_emergency_contact/:key",
            put(endpoints::contacts::update),
        )
        .route(
            "/delete_emergency_contact/:key",
            delete(endpoints::contacts::delete),
        )
        .route("/save_appointment", post(endpoints::appointments::save))
        .route("/update_appointment/:key", put(endpoints::appointments::update))
        .route(
            "/delete_appointment/:key",
            delete(endpoints::appointments::delete),
        )
        .route("/get_appointments", get(endpoints::appointments::list))
        .route(
            "/available_slots/:department/:doctor/:date",
            get(endpoints::appointments::available_slots),
        )
        .route("/set_language", post(endpoints::language::set_language))
        .route("/get_language", get(endpoints::language::get_language))
        .route("/get_chat_history", get(endpoints::chat::history))
        .route("/clear_chat", post(endpoints::chat::clear_chat))
        .route("/clear_chat_history", post(endpoints::chat::clear_chat_history))
        .route("/get_weather_tip", get(endpoints::wellness::weather_tip))
        .route("/find_doctors", get(endpoints::wellness::find_doctors))
        .route("/uploads/:filename", get(endpoints::media::serve_upload))
        .route("/health", get(endpoints::health::check))
        .merge(uploads)
        .with_state(ctx)
        .fallback_service(ServeDir::new(static_dir))
        // Middleware stack (innermost first, outermost last):
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(axum::middleware::from_fn(middleware::session::attach_session))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
