use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::api::types::DashboardStatsDto;

/// GET /api/dashboard/stats
pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DashboardStatsDto>>, ApiError> {
    let stats = state
        .store()
        .dashboard_stats()
        .await
        .map_err(|e| ApiError::database(format!("Failed to compute dashboard stats: {e}")))?;

    Ok(Json(ApiResponse::success(stats.into())))
}
