//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user registration and login.
//!
//! Passwords are hashed with Argon2 and only the PHC hash string is stored.
//! Neither endpoint opens a session; the client keeps the returned user id.

use crate::{
    error::ApiError,
    web::{
        parse_json,
        protocol::{AuthResponse, LoginRequest, RegisterRequest},
        state::AppState,
    },
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use legal_assistant_core::{constants::normalize_language, domain::NewUser, ports::PortError};
use std::sync::Arc;
use tracing::{error, info, warn};

const DUPLICATE_USER: &str = "User already exists with this email";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            ApiError::Internal("Failed to hash password".to_string())
        })
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, ApiError> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        ApiError::Internal("Authentication error".to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/auth/register - Create a new user account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Invalid request or user already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let req = parse_json(payload, state.config.max_upload_bytes)?;
    req.validate()?;

    let password_hash = hash_password(&req.password)?;

    // The store checks both unique keys under one lock.
    let user = state
        .db
        .create_user(NewUser {
            username: req.username.trim().to_string(),
            email: req.email.trim().to_string(),
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone.filter(|p| !p.trim().is_empty()),
            preferred_language: normalize_language(req.preferred_language.as_deref()),
            password_hash,
        })
        .await
        .map_err(|e| match e {
            PortError::Conflict(what) => {
                warn!("Registration rejected: {}", what);
                ApiError::Validation(DUPLICATE_USER.to_string())
            }
            other => ApiError::external("Registration failed", other),
        })?;

    info!(id = user.id, "Registered user '{}'", user.username);
    Ok((StatusCode::CREATED, Json(AuthResponse { user: user.into() })))
}

/// POST /api/auth/login - Login with existing account
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let req = parse_json(payload, state.config.max_upload_bytes)?;

    let credentials = match state.db.get_user_credentials(req.email.trim()).await {
        Ok(credentials) => credentials,
        Err(PortError::Unauthorized | PortError::NotFound(_)) => {
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))
        }
        Err(other) => return Err(ApiError::external("Login failed", other)),
    };

    if !verify_password(&req.password, &credentials.password_hash)? {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    info!(id = credentials.user.id, "User logged in");
    Ok(Json(AuthResponse {
        user: credentials.user.into(),
    }))
}
