//! services/api/src/web/rest.rs
//!
//! Contains the liveness handler and the master definition for the OpenAPI
//! specification.

use crate::web::{auth, blog, chat, contact, lawyers, protocol::*};
use axum::Json;
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        auth::register_handler,
        auth::login_handler,
        chat::send_message_handler,
        chat::send_voice_handler,
        chat::send_file_handler,
        chat::chat_history_handler,
        lawyers::list_lawyers_handler,
        lawyers::get_lawyer_handler,
        lawyers::create_lawyer_handler,
        blog::list_posts_handler,
        blog::get_post_handler,
        contact::contact_handler,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserView,
            ChatMessageRequest,
            ChatTurnResponse,
            ChatMessageView,
            CreateLawyerRequest,
            LawyerView,
            BlogPostView,
            ContactRequest,
            ContactResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "Legal Assistant API", description = "Multilingual legal guidance for Indian law: chat, lawyer directory, blog and contact.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
