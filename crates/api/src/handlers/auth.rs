//! Handlers for the `/auth` resource (register, login, refresh, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use bluecarbon_core::error::CoreError;
use bluecarbon_core::roles::UserRole;
use bluecarbon_core::types::DbId;
use bluecarbon_db::models::profile::CreateProfile;
use bluecarbon_db::repositories::{ProfileRepo, SessionRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request / response types
-------------------------------------------------------------------------- */

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "Full name must not be empty"))]
    pub full_name: String,
    pub organization: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by register, login, refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub profile: ProfileInfo,
}

/// Public profile info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct ProfileInfo {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// POST /api/v1/auth/register
///
/// Create a profile with the default `public` role and start a session.
/// Role promotion is an admin action, never self-service.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateProfile {
        email: input.email.to_lowercase(),
        password_hash,
        full_name: input.full_name,
        organization: input.organization,
        contact_email: input.contact_email,
        phone: input.phone,
    };

    // A duplicate email trips uq_profiles_email and surfaces as 409.
    let profile = ProfileRepo::create(&state.pool, &create).await?;

    tracing::info!(profile_id = %profile.id, "Profile registered");

    let response = create_auth_response(&state, profile.id, &profile.email, &profile.full_name,
        profile.role).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let profile = ProfileRepo::find_by_email(&state.pool, &input.email.to_lowercase())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &profile.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    tracing::info!(profile_id = %profile.id, "Login succeeded");

    let response = create_auth_response(&state, profile.id, &profile.email, &profile.full_name,
        profile.role).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The old
/// session is revoked (rotation) so a captured token works at most once.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Unknown refresh token".into()))
        })?;

    if !session.is_active(Utc::now()) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Refresh token expired or revoked".into(),
        )));
    }

    let profile = ProfileRepo::find_by_id(&state.pool, session.profile_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Profile no longer exists".into()))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let response = create_auth_response(&state, profile.id, &profile.email, &profile.full_name,
        profile.role).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke the session matching the presented refresh token.
pub async fn logout(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<StatusCode> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    if let Some(session) =
        SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash).await?
    {
        // Only the session owner can revoke it.
        if session.profile_id == auth.profile_id {
            SessionRepo::revoke(&state.pool, session.id).await?;
            tracing::info!(profile_id = %auth.profile_id, "Session revoked");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// Return the authenticated profile.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<bluecarbon_db::models::profile::Profile>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth.profile_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: auth.profile_id,
            })
        })?;
    Ok(Json(DataResponse { data: profile }))
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Generate access + refresh tokens and persist the session.
async fn create_auth_response(
    state: &AppState,
    profile_id: DbId,
    email: &str,
    full_name: &str,
    role: UserRole,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(profile_id, role.as_str(), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_token, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);
    SessionRepo::create(&state.pool, profile_id, &refresh_hash, expires_at).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        profile: ProfileInfo {
            id: profile_id,
            email: email.to_string(),
            full_name: full_name.to_string(),
            role,
        },
    })
}
