use axum::{
    Extension, Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, validation};
use crate::api::error::FieldError;
use crate::api::types::{MessageResponse, UserDto};
use crate::db::{AuditEvent, NewAuditTrail, NewUser, User};

/// Session key holding the authenticated user's id.
const SESSION_USER_KEY: &str = "user_id";

/// Enumeration-safe response for forgot-password, identical whether or not
/// the account exists.
const RESET_MESSAGE: &str =
    "If an account with that email exists, a password reset link will be sent.";

/// The authenticated user, attached to the request by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Gate for mutating endpoints: requires a live session and loads the
/// session user into request extensions for handlers that need the actor.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = session_user(&state, &session).await?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Resolve the session to a user, or fail with 401.
async fn session_user(state: &AppState, session: &Session) -> Result<User, ApiError> {
    let user_id = session
        .get::<i32>(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(ApiError::unauthorized)?;

    state
        .store()
        .get_user(user_id)
        .await
        .map_err(|e| ApiError::database(format!("Failed to load session user: {e}")))?
        .ok_or_else(ApiError::unauthorized)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/register
/// Create an account, log it in, and audit the registration.
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut errors = Vec::new();

    if payload.username.trim().is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    }
    if !validation::is_valid_email(&payload.email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if payload.password.len() < validation::MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    if payload.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }

    if !errors.is_empty() {
        return Err(ApiError::RegistrationErrors(errors));
    }

    // Duplicates are checked proactively rather than relying on the unique
    // columns so the client gets a stable message.
    let existing = state
        .store()
        .get_user_by_email(&payload.email)
        .await
        .map_err(|e| ApiError::database(format!("Failed to check email: {e}")))?;
    if existing.is_some() {
        return Err(ApiError::validation("Email already in use"));
    }

    let existing = state
        .store()
        .get_user_by_username(&payload.username)
        .await
        .map_err(|e| ApiError::database(format!("Failed to check username: {e}")))?;
    if existing.is_some() {
        return Err(ApiError::validation("Username already exists"));
    }

    let user = state
        .store()
        .create_user(
            NewUser {
                username: payload.username,
                email: payload.email,
                password: payload.password,
                name: payload.name,
            },
            &state.config().security,
        )
        .await
        .map_err(|e| ApiError::database(format!("Failed to create user: {e}")))?;

    session
        .insert(SESSION_USER_KEY, user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    state
        .store()
        .create_audit_trail(NewAuditTrail {
            description: format!("User {} was registered", user.name),
            event: AuditEvent::Create,
            category: "User".to_string(),
            performed_by: user.name.clone(),
        })
        .await
        .map_err(|e| ApiError::database(format!("Failed to record audit trail: {e}")))?;

    tracing::info!("Registered user: {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

/// POST /api/login
/// Authenticate by email and password; mismatch and unknown email get the
/// same generic 401.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let is_valid = state
        .store()
        .verify_user_password(&payload.email, &payload.password, &state.config().security)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?;

    if !is_valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let user = state
        .store()
        .get_user_by_email(&payload.email)
        .await
        .map_err(|e| ApiError::database(format!("Failed to get user: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    session
        .insert(SESSION_USER_KEY, user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    state
        .store()
        .create_audit_trail(NewAuditTrail {
            description: format!("User {} logged in", user.name),
            event: AuditEvent::Login,
            category: "User".to_string(),
            performed_by: user.name.clone(),
        })
        .await
        .map_err(|e| ApiError::database(format!("Failed to record audit trail: {e}")))?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// POST /api/logout
/// Audit the logout (when a session user exists) before destroying the
/// session. Always 200.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<impl IntoResponse, ApiError> {
    if let Ok(user) = session_user(&state, &session).await {
        state
            .store()
            .create_audit_trail(NewAuditTrail {
                description: format!("User {} logged out", user.name),
                event: AuditEvent::Logout,
                category: "User".to_string(),
                performed_by: user.name,
            })
            .await
            .map_err(|e| ApiError::database(format!("Failed to record audit trail: {e}")))?;
    }

    session
        .flush()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to destroy session: {e}")))?;

    Ok(StatusCode::OK)
}

/// GET /api/user
/// The session user without the password field, or 401.
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = session_user(&state, &session).await?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// GET /api/users
/// Admin only: every user, passwords stripped.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    if user.role != "admin" {
        return Err(ApiError::forbidden());
    }

    let users = state
        .store()
        .list_users()
        .await
        .map_err(|e| ApiError::database(format!("Failed to list users: {e}")))?;

    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

/// POST /api/forgot-password
/// Always the same message; the audit entry is the only observable
/// difference, and only server-side. Mail delivery is a stub.
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::validation("Email is required"));
    }

    let user = state
        .store()
        .get_user_by_email(&payload.email)
        .await
        .map_err(|e| ApiError::database(format!("Failed to look up email: {e}")))?;

    if let Some(user) = user {
        state
            .store()
            .create_audit_trail(NewAuditTrail {
                description: format!("Password reset requested for user {}", user.name),
                event: AuditEvent::Reset,
                category: "User".to_string(),
                performed_by: "System".to_string(),
            })
            .await
            .map_err(|e| ApiError::database(format!("Failed to record audit trail: {e}")))?;
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: RESET_MESSAGE.to_string(),
    })))
}
