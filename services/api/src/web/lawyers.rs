//! services/api/src/web/lawyers.rs
//!
//! Lawyer directory endpoints.

use crate::{
    error::ApiError,
    web::{
        parse_json,
        protocol::{CreateLawyerRequest, LawyerQuery, LawyerView},
        state::AppState,
    },
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use legal_assistant_core::{
    domain::{LawyerSearch, NewLawyer},
    ports::PortError,
};
use std::sync::Arc;
use tracing::info;

/// Search the directory. With no filters every lawyer is returned.
#[utoipa::path(
    get,
    path = "/api/lawyers",
    params(
        ("location" = Option<String>, Query, description = "Case-insensitive substring of the city."),
        ("specialization" = Option<String>, Query, description = "Practice area, or `All Areas`."),
        ("experience" = Option<String>, Query, description = "`0-5 years`, `5-10 years`, `10+ years` or `Any Experience`.")
    ),
    responses(
        (status = 200, description = "Matching lawyers", body = [LawyerView]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Lawyers"
)]
pub async fn list_lawyers_handler(
    State(app_state): State<Arc<AppState>>,
    query: Result<Query<LawyerQuery>, QueryRejection>,
) -> Result<Json<Vec<LawyerView>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    let search = LawyerSearch::from_filters(
        query.location.as_deref(),
        query.specialization.as_deref(),
        query.experience.as_deref(),
    );

    let lawyers = if search.is_empty() {
        app_state.db.list_lawyers().await
    } else {
        app_state.db.search_lawyers(&search).await
    }
    .map_err(|e| ApiError::external("Failed to fetch lawyers", e))?;

    Ok(Json(lawyers.into_iter().map(LawyerView::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/lawyers/{id}",
    params(("id" = i64, Path, description = "Lawyer id.")),
    responses(
        (status = 200, description = "The lawyer", body = LawyerView),
        (status = 404, description = "No lawyer with that id")
    ),
    tag = "Lawyers"
)]
pub async fn get_lawyer_handler(
    State(app_state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<LawyerView>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::Validation("Invalid lawyer id".to_string()))?;
    let lawyer = app_state
        .db
        .get_lawyer(id)
        .await
        .map_err(|e| ApiError::external("Failed to fetch lawyer", e))?;
    Ok(Json(lawyer.into()))
}

/// Add a lawyer to the directory.
#[utoipa::path(
    post,
    path = "/api/lawyers",
    request_body = CreateLawyerRequest,
    responses(
        (status = 201, description = "Lawyer created", body = LawyerView),
        (status = 400, description = "Invalid lawyer data or duplicate email")
    ),
    tag = "Lawyers"
)]
pub async fn create_lawyer_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<CreateLawyerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LawyerView>), ApiError> {
    let request = parse_json(payload, app_state.config.max_upload_bytes)?;
    request.validate()?;

    let lawyer = app_state
        .db
        .create_lawyer(NewLawyer {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone,
            specialization: request.specialization,
            location: request.location,
            experience: request.experience,
            rating: request.rating.unwrap_or(0),
            review_count: request.review_count.unwrap_or(0),
            bio: request.bio,
            languages: request.languages,
            verified: request.verified.unwrap_or(false),
        })
        .await
        .map_err(|e| match e {
            PortError::Conflict(what) => ApiError::Validation(what),
            other => ApiError::external("Failed to create lawyer", other),
        })?;

    info!(id = lawyer.id, "Added lawyer '{}' to the directory", lawyer.name);
    Ok((StatusCode::CREATED, Json(lawyer.into())))
}
