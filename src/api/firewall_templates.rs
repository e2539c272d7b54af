use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, validation};
use crate::api::auth::CurrentUser;
use crate::api::types::{CreateFirewallTemplateRequest, FirewallTemplateDto};
use crate::db::{AuditEvent, NewAuditTrail, NewFirewallTemplate};

/// GET /api/firewall-templates
pub async fn list_firewall_templates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<FirewallTemplateDto>>>, ApiError> {
    let templates = state
        .store()
        .list_firewall_templates()
        .await
        .map_err(|e| ApiError::database(format!("Failed to list firewall templates: {e}")))?;

    Ok(Json(ApiResponse::success(
        templates.into_iter().map(FirewallTemplateDto::from).collect(),
    )))
}

/// POST /api/firewall-templates
pub async fn create_firewall_template(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateFirewallTemplateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_name("Template name", &payload.name)?;

    let template = state
        .store()
        .create_firewall_template(NewFirewallTemplate { name: payload.name })
        .await
        .map_err(|e| ApiError::database(format!("Failed to create firewall template: {e}")))?;

    state
        .store()
        .create_audit_trail(NewAuditTrail {
            description: format!("Firewall template {} was created", template.name),
            event: AuditEvent::Create,
            category: "Firewall Template".to_string(),
            performed_by: user.name,
        })
        .await
        .map_err(|e| ApiError::database(format!("Failed to record audit trail: {e}")))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(FirewallTemplateDto::from(template))),
    ))
}
