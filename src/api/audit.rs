use axum::{Json, extract::State};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::api::types::{AuditTrailDto, AuditTrailFilterRequest};
use crate::db::AuditTrailFilter;

/// GET /api/audit-trails
/// Newest first.
pub async fn list_audit_trails(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<AuditTrailDto>>>, ApiError> {
    let trails = state
        .store()
        .list_audit_trails()
        .await
        .map_err(|e| ApiError::database(format!("Failed to list audit trails: {e}")))?;

    Ok(Json(ApiResponse::success(
        trails.into_iter().map(AuditTrailDto::from).collect(),
    )))
}

/// POST /api/audit-trails/filter
/// All filter fields optional; the date range is inclusive on both ends.
pub async fn filter_audit_trails(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AuditTrailFilterRequest>,
) -> Result<Json<ApiResponse<Vec<AuditTrailDto>>>, ApiError> {
    let filter = AuditTrailFilter {
        category: payload.category,
        event: payload.event,
        performed_by: payload.performed_by,
        start_timestamp: payload
            .start_date
            .as_deref()
            .map(|s| parse_bound(s, false))
            .transpose()?,
        end_timestamp: payload
            .end_date
            .as_deref()
            .map(|s| parse_bound(s, true))
            .transpose()?,
    };

    let trails = state
        .store()
        .filter_audit_trails(filter)
        .await
        .map_err(|e| ApiError::database(format!("Failed to filter audit trails: {e}")))?;

    Ok(Json(ApiResponse::success(
        trails.into_iter().map(AuditTrailDto::from).collect(),
    )))
}

/// Normalize a client-supplied date bound to the stored timestamp format.
/// Accepts a full RFC 3339 instant or a bare `YYYY-MM-DD` date; a bare date
/// expands to the start or end of that UTC day depending on which bound it
/// is.
fn parse_bound(input: &str, is_end: bool) -> Result<String, ApiError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let time = if is_end {
            date.and_hms_milli_opt(23, 59, 59, 999)
        } else {
            date.and_hms_milli_opt(0, 0, 0, 0)
        };
        if let Some(naive) = time {
            return Ok(naive
                .and_utc()
                .to_rfc3339_opts(SecondsFormat::Millis, true));
        }
    }

    Err(ApiError::validation("Invalid filter parameters"))
}
