//! Operator login endpoint.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::auth;
use crate::errors::AppError;
use crate::models::{AuthRequest, AuthResponse};
use crate::AppState;

/// POST /api/auth - Exchange the shared password for a session token.
///
/// On success the token is returned in the body (for client-side UI checks)
/// and set as the httpOnly session cookie. Failures disclose nothing beyond
/// "Invalid password".
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<AuthRequest>,
) -> Result<Response, AppError> {
    let password = match request.password {
        Some(p) if !p.is_empty() => p,
        _ => return Err(AppError::Validation("Password is required".to_string())),
    };

    let authenticated = state
        .config
        .login_password
        .as_deref()
        .map_or(false, |expected| auth::verify_password(&password, expected));
    if !authenticated {
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    let token = auth::mint_token(&state.config.token_secret);
    let cookie = HeaderValue::from_str(&auth::session_cookie(&token))
        .map_err(|e| AppError::Internal(format!("Bad cookie value: {}", e)))?;

    let body = AuthResponse {
        success: true,
        message: "Authentication successful".to_string(),
        token,
    };

    let mut response = Json(body).into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}
