use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, validation};
use crate::api::auth::CurrentUser;
use crate::api::types::{CreateTenantRequest, TenantDto};
use crate::db::{AuditEvent, NewAuditTrail, NewTenant};

/// GET /api/tenants
pub async fn list_tenants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TenantDto>>>, ApiError> {
    let tenants = state
        .store()
        .list_tenants()
        .await
        .map_err(|e| ApiError::database(format!("Failed to list tenants: {e}")))?;

    Ok(Json(ApiResponse::success(
        tenants.into_iter().map(TenantDto::from).collect(),
    )))
}

#[derive(Debug, Deserialize)]
pub struct TopTenantsQuery {
    pub limit: Option<u64>,
}

/// GET /api/tenants/top?limit=N
/// Heaviest data users first. Default 5.
pub async fn top_tenants(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopTenantsQuery>,
) -> Result<Json<ApiResponse<Vec<TenantDto>>>, ApiError> {
    let limit = validation::validate_limit(query.limit.unwrap_or(5))?;

    let tenants = state
        .store()
        .top_tenants(limit)
        .await
        .map_err(|e| ApiError::database(format!("Failed to query top tenants: {e}")))?;

    Ok(Json(ApiResponse::success(
        tenants.into_iter().map(TenantDto::from).collect(),
    )))
}

/// POST /api/tenants
pub async fn create_tenant(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateTenantRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_name("Tenant name", &payload.name)?;

    if payload.data_usage < 0 {
        return Err(ApiError::validation("Data usage cannot be negative"));
    }

    let tenant = state
        .store()
        .create_tenant(NewTenant {
            name: payload.name,
            data_usage: payload.data_usage,
        })
        .await
        .map_err(|e| ApiError::database(format!("Failed to create tenant: {e}")))?;

    state
        .store()
        .create_audit_trail(NewAuditTrail {
            description: format!("Tenant {} was created", tenant.name),
            event: AuditEvent::Create,
            category: "Tenant".to_string(),
            performed_by: user.name,
        })
        .await
        .map_err(|e| ApiError::database(format!("Failed to record audit trail: {e}")))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(TenantDto::from(tenant))),
    ))
}
