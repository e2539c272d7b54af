use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, validation};
use crate::api::auth::CurrentUser;
use crate::api::types::{CreateFleetRequest, FleetDto};
use crate::db::{AuditEvent, NewAuditTrail, NewFleet};

/// GET /api/fleets
pub async fn list_fleets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<FleetDto>>>, ApiError> {
    let fleets = state
        .store()
        .list_fleets()
        .await
        .map_err(|e| ApiError::database(format!("Failed to list fleets: {e}")))?;

    Ok(Json(ApiResponse::success(
        fleets.into_iter().map(FleetDto::from).collect(),
    )))
}

/// POST /api/fleets
pub async fn create_fleet(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateFleetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_name("Fleet name", &payload.name)?;

    let fleet = state
        .store()
        .create_fleet(NewFleet { name: payload.name })
        .await
        .map_err(|e| ApiError::database(format!("Failed to create fleet: {e}")))?;

    state
        .store()
        .create_audit_trail(NewAuditTrail {
            description: format!("Fleet {} was created", fleet.name),
            event: AuditEvent::Create,
            category: "Fleet".to_string(),
            performed_by: user.name,
        })
        .await
        .map_err(|e| ApiError::database(format!("Failed to record audit trail: {e}")))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(FleetDto::from(fleet))),
    ))
}
