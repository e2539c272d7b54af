use serde::{Deserialize, Serialize};

use crate::db::{DashboardStats, HotspotUserStats, RouterStats, User};
use crate::entities::{audit_trails, firewall_templates, fleets, hotspot_users, routers, tenants};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// User as exposed by the API. The password hash never leaves the server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub role: String,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            avatar: user.avatar,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDto {
    pub id: i32,
    pub name: String,
    pub data_usage: i64,
    pub created_at: String,
}

impl From<tenants::Model> for TenantDto {
    fn from(model: tenants::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            data_usage: model.data_usage,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetDto {
    pub id: i32,
    pub name: String,
    pub created_at: String,
}

impl From<fleets::Model> for FleetDto {
    fn from(model: fleets::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterDto {
    pub id: i32,
    pub name: String,
    pub identifier: String,
    pub online: bool,
    pub created_at: String,
}

impl From<routers::Model> for RouterDto {
    fn from(model: routers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            identifier: model.identifier,
            online: model.online,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotUserDto {
    pub id: i32,
    pub username: String,
    pub active: bool,
    pub router_id: i32,
    pub created_at: String,
}

impl From<hotspot_users::Model> for HotspotUserDto {
    fn from(model: hotspot_users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            active: model.active,
            router_id: model.router_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallTemplateDto {
    pub id: i32,
    pub name: String,
    pub created_at: String,
}

impl From<firewall_templates::Model> for FirewallTemplateDto {
    fn from(model: firewall_templates::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrailDto {
    pub id: i32,
    pub description: String,
    pub event: String,
    pub category: String,
    pub performed_by: String,
    pub timestamp: String,
}

impl From<audit_trails::Model> for AuditTrailDto {
    fn from(model: audit_trails::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            event: model.event,
            category: model.category,
            performed_by: model.performed_by,
            timestamp: model.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterStatsDto {
    pub online: u64,
    pub total: u64,
}

impl From<RouterStats> for RouterStatsDto {
    fn from(stats: RouterStats) -> Self {
        Self {
            online: stats.online,
            total: stats.total,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotUserStatsDto {
    pub active: u64,
    pub total: u64,
}

impl From<HotspotUserStats> for HotspotUserStatsDto {
    fn from(stats: HotspotUserStats) -> Self {
        Self {
            active: stats.active,
            total: stats.total,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub total_data_exchanged: i64,
    pub hotspot_users: HotspotUserStatsDto,
    pub online_routers: RouterStatsDto,
    pub total_tenants: u64,
    pub total_fleets: u64,
}

impl From<DashboardStats> for DashboardStatsDto {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_data_exchanged: stats.total_data_exchanged,
            hotspot_users: stats.hotspot_users.into(),
            online_routers: stats.online_routers.into(),
            total_tenants: stats.total_tenants,
            total_fleets: stats.total_fleets,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantRequest {
    pub name: String,
    #[serde(default)]
    pub data_usage: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateFleetRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateRouterRequest {
    pub name: String,
    pub identifier: String,
    #[serde(default)]
    pub online: bool,
}

const fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotspotUserRequest {
    pub username: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub router_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateFirewallTemplateRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrailFilterRequest {
    pub category: Option<String>,
    pub event: Option<String>,
    pub performed_by: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
