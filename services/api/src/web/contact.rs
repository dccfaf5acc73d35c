//! services/api/src/web/contact.rs

use crate::{
    error::ApiError,
    web::{
        parse_json,
        protocol::{ContactRequest, ContactResponse},
        state::AppState,
    },
};
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use legal_assistant_core::domain::NewContactMessage;
use std::sync::Arc;
use tracing::info;

/// Store a message from the contact form.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message stored", body = ContactResponse),
        (status = 400, description = "Invalid contact data")
    ),
    tag = "Contact"
)]
pub async fn contact_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let request = parse_json(payload, app_state.config.max_upload_bytes)?;
    request.validate()?;

    let stored = app_state
        .db
        .create_contact_message(NewContactMessage {
            name: request.name,
            email: request.email,
            subject: request.subject,
            message: request.message,
        })
        .await
        .map_err(|e| ApiError::external("Failed to send message", e))?;

    info!(id = stored.id, "Contact message received: '{}'", stored.subject);
    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: "Message sent successfully".to_string(),
            id: stored.id,
        }),
    ))
}
