use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, validation};
use crate::api::auth::CurrentUser;
use crate::api::types::{CreateRouterRequest, RouterDto, RouterStatsDto};
use crate::db::{AuditEvent, NewAuditTrail, NewRouter};

/// GET /api/routers
pub async fn list_routers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RouterDto>>>, ApiError> {
    let routers = state
        .store()
        .list_routers()
        .await
        .map_err(|e| ApiError::database(format!("Failed to list routers: {e}")))?;

    Ok(Json(ApiResponse::success(
        routers.into_iter().map(RouterDto::from).collect(),
    )))
}

/// GET /api/routers/stats
pub async fn router_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<RouterStatsDto>>, ApiError> {
    let stats = state
        .store()
        .router_stats()
        .await
        .map_err(|e| ApiError::database(format!("Failed to query router stats: {e}")))?;

    Ok(Json(ApiResponse::success(stats.into())))
}

/// POST /api/routers
pub async fn create_router(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateRouterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_name("Router name", &payload.name)?;
    validation::validate_name("Router identifier", &payload.identifier)?;

    let existing = state
        .store()
        .get_router_by_identifier(&payload.identifier)
        .await
        .map_err(|e| ApiError::database(format!("Failed to check router identifier: {e}")))?;
    if existing.is_some() {
        return Err(ApiError::validation("Router identifier already exists"));
    }

    let router = state
        .store()
        .create_router(NewRouter {
            name: payload.name,
            identifier: payload.identifier,
            online: payload.online,
        })
        .await
        .map_err(|e| ApiError::database(format!("Failed to create router: {e}")))?;

    state
        .store()
        .create_audit_trail(NewAuditTrail {
            description: format!("Router {} ({}) was created", router.name, router.identifier),
            event: AuditEvent::Create,
            category: "Router".to_string(),
            performed_by: user.name,
        })
        .await
        .map_err(|e| ApiError::database(format!("Failed to record audit trail: {e}")))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RouterDto::from(router))),
    ))
}
