pub mod auth;
pub mod blog;
pub mod chat;
pub mod chat_task;
pub mod contact;
pub mod lawyers;
pub mod middleware;
pub mod protocol;
pub mod rest;
pub mod state;

use crate::{error::ApiError, web::state::AppState};
use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, DefaultBodyLimit},
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

/// Unwraps a JSON body, turning extractor rejections into `{"message"}` errors.
pub(crate) fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    limit: usize,
) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(ApiError::PayloadTooLarge { limit })
        }
        Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
    }
}

pub(crate) fn multipart_error(err: MultipartError, limit: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { limit }
    } else {
        ApiError::Validation(err.body_text())
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, middleware::REQUEST_ID_HEADER]);
    match origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            warn!("Ignoring unparseable CORS origin '{}'", origin);
            layer
        }
    }
}

/// Builds the complete API router over the given state. The binary adds the
/// Swagger UI on top; tests drive this router directly.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    let body_limit = app_state.config.max_upload_bytes;
    let cors = cors_layer(&app_state.config.cors_origin);

    Router::new()
        .route("/api/health", get(rest::health_handler))
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/chat/message", post(chat::send_message_handler))
        .route("/api/chat/voice", post(chat::send_voice_handler))
        .route("/api/chat/file", post(chat::send_file_handler))
        .route("/api/chat/history/{user_id}", get(chat::chat_history_handler))
        .route(
            "/api/lawyers",
            get(lawyers::list_lawyers_handler).post(lawyers::create_lawyer_handler),
        )
        .route("/api/lawyers/{id}", get(lawyers::get_lawyer_handler))
        .route("/api/blog", get(blog::list_posts_handler))
        .route("/api/blog/{slug}", get(blog::get_post_handler))
        .route("/api/contact", post(contact::contact_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(middleware::request_id))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
