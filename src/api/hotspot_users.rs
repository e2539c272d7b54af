use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, validation};
use crate::api::auth::CurrentUser;
use crate::api::types::{CreateHotspotUserRequest, HotspotUserDto, HotspotUserStatsDto};
use crate::db::{AuditEvent, NewAuditTrail, NewHotspotUser};

/// GET /api/hotspot-users
pub async fn list_hotspot_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<HotspotUserDto>>>, ApiError> {
    let users = state
        .store()
        .list_hotspot_users()
        .await
        .map_err(|e| ApiError::database(format!("Failed to list hotspot users: {e}")))?;

    Ok(Json(ApiResponse::success(
        users.into_iter().map(HotspotUserDto::from).collect(),
    )))
}

/// GET /api/hotspot-users/stats
pub async fn hotspot_user_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HotspotUserStatsDto>>, ApiError> {
    let stats = state
        .store()
        .hotspot_user_stats()
        .await
        .map_err(|e| ApiError::database(format!("Failed to query hotspot user stats: {e}")))?;

    Ok(Json(ApiResponse::success(stats.into())))
}

/// POST /api/hotspot-users
/// The router reference is best effort: the audit entry names the owning
/// router when it resolves and falls back to "Unknown" otherwise.
pub async fn create_hotspot_user(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateHotspotUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_name("Username", &payload.username)?;

    let hotspot_user = state
        .store()
        .create_hotspot_user(NewHotspotUser {
            username: payload.username,
            active: payload.active,
            router_id: payload.router_id,
        })
        .await
        .map_err(|e| ApiError::database(format!("Failed to create hotspot user: {e}")))?;

    let router_name = state
        .store()
        .get_router(hotspot_user.router_id)
        .await
        .map_err(|e| ApiError::database(format!("Failed to look up router: {e}")))?
        .map_or_else(|| "Unknown".to_string(), |r| r.name);

    state
        .store()
        .create_audit_trail(NewAuditTrail {
            description: format!(
                "Hotspot user {} was created for router {}",
                hotspot_user.username, router_name
            ),
            event: AuditEvent::Create,
            category: "Hotspot User".to_string(),
            performed_by: user.name,
        })
        .await
        .map_err(|e| ApiError::database(format!("Failed to record audit trail: {e}")))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(HotspotUserDto::from(hotspot_user))),
    ))
}
