//! Authentication handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{Principal, User};
use blog_core::ports::AuthError;
use blog_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

fn token_response(state: &AppState, principal: &Principal) -> AppResult<AuthResponse> {
    // Signing failures are server faults, not bad credentials.
    let token = state
        .tokens
        .generate_token(principal)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    if !state.registration_open {
        return Err(AppError::Forbidden("Registration is closed".to_string()));
    }

    let req = body.into_inner();

    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = state.passwords.hash(&req.password)?;

    let user = state.users.insert(User::new(&req.email, password_hash)).await?;
    tracing::info!(user_id = %user.id, "Author registered");

    Ok(HttpResponse::Created().json(token_response(&state, &user.principal())?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Rejected login");
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(HttpResponse::Ok().json(token_response(&state, &user.principal())?))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    let Identity(principal) = identity;
    Ok(HttpResponse::Ok().json(UserResponse {
        id: principal.user_id,
        email: principal.email,
    }))
}
